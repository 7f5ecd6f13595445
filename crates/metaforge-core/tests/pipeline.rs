//! Load, edit and write documents end to end.

use metaforge_core::{
    apply_edits, load_document, write_object, AttributeValue, CatalogEntry, DocumentKind, Error, ErrorKind,
    ObjectType,
};

const WEAPONS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CWeaponInfoBlob>
  <SlotNavigateOrder>
    <Item>
      <WeaponSlots>
        <Item>
          <OrderNumber value="100" />
          <Entry>SLOT_PISTOL</Entry>
        </Item>
      </WeaponSlots>
    </Item>
  </SlotNavigateOrder>
  <SlotBestOrder>
    <WeaponSlots>
      <Item>
        <OrderNumber value="60" />
        <Entry>SLOT_PISTOL</Entry>
      </Item>
    </WeaponSlots>
  </SlotBestOrder>
  <Infos>
    <Item>
      <Infos>
        <Item type="CWeaponInfo">
          <Name>WEAPON_PISTOL</Name>
          <Model>w_pi_pistol</Model>
          <Audio />
          <Damage value="26.000000" />
          <AimOffset x="0.100000" y="0.200000" z="0.600000" />
          <Fx>
            <EffectGroup>WEAPON_EFFECT_GROUP_PISTOL_SMALL</EffectGroup>
            <FlashFx>muz_pistol</FlashFx>
            <FlashFxScale value="1.000000" />
          </Fx>
          <OverrideForces>
            <Item>
              <BoneTag>BONETAG_HEAD</BoneTag>
              <ForceFront value="50.000000" />
              <ForceBack value="20.000000" />
            </Item>
          </OverrideForces>
          <AttachPoints>
            <Item>
              <AttachBone>WAPClip</AttachBone>
              <Components>
                <Item>
                  <Name>COMPONENT_PISTOL_CLIP_01</Name>
                  <Default value="true" />
                </Item>
              </Components>
            </Item>
          </AttachPoints>
          <WeaponFlags>CarriedInHand Gun CanLockonOnFoot</WeaponFlags>
        </Item>
        <Item type="CWeaponInfo">
          <Name>WEAPON_COMBATPISTOL</Name>
          <Model>w_pi_combatpistol</Model>
          <Damage value="27.000000" />
          <WeaponFlags>CarriedInHand Gun Silenced</WeaponFlags>
        </Item>
      </Infos>
    </Item>
  </Infos>
  <Name>Pistols</Name>
</CWeaponInfoBlob>
"#;

fn weapons_file(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("weapons_in.meta");
    std::fs::write(&path, WEAPONS).unwrap();
    path
}

#[test]
fn test_generate_weapon_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = weapons_file(dir.path());
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    let document = load_document(&input).unwrap();
    assert_eq!(document.kind(), DocumentKind::Weapons);
    assert_eq!(document.names().collect::<Vec<_>>(), ["WEAPON_PISTOL", "WEAPON_COMBATPISTOL"]);

    let template = document.template("WEAPON_PISTOL").unwrap();
    let custom = apply_edits(
        template,
        [("Name", "WEAPON_CUSTOM"), ("Damage", "80.0"), ("AimOffset", "0.0")],
    )
    .unwrap();

    let path = write_object(&custom, &out, "weap").unwrap();
    assert_eq!(path, out.join("weapons.meta"));

    let written = load_document(&path).unwrap();
    assert_eq!(written.objects().len(), 1);
    let object = &written.objects()[0];
    assert_eq!(object, &custom);
    assert_eq!(object.get("Damage"), Some(&AttributeValue::value_bag("80.0")));
    assert_eq!(object.get("AimOffset"), Some(&AttributeValue::value_bag("0.0")));
    assert_eq!(object.get("OverrideForces"), template.get("OverrideForces"));
    assert_eq!(object.get("AttachPoints"), template.get("AttachPoints"));
    assert!(written.slots().unwrap().navigate.is_empty());

    // The template document is left alone.
    assert_eq!(std::fs::read_to_string(&input).unwrap(), WEAPONS);
}

#[test]
fn test_second_write_appends() {
    let dir = tempfile::tempdir().unwrap();
    let document = load_document(weapons_file(dir.path())).unwrap();

    for name in ["WEAPON_A", "WEAPON_B", "WEAPON_C"] {
        let custom = apply_edits(document.template("WEAPON_COMBATPISTOL").unwrap(), [("Name", name)]).unwrap();
        write_object(&custom, dir.path(), "weap").unwrap();
    }

    let written = load_document(dir.path().join("weapons.meta")).unwrap();
    assert_eq!(written.names().collect::<Vec<_>>(), ["WEAPON_A", "WEAPON_B", "WEAPON_C"]);
}

#[test]
fn test_catalog_across_weapons() {
    let dir = tempfile::tempdir().unwrap();
    let document = load_document(weapons_file(dir.path())).unwrap();
    let catalog = document.catalog();

    let flags = catalog.get("WeaponFlags").and_then(CatalogEntry::values).unwrap();
    assert_eq!(flags.len(), 4);
    assert!(flags.contains("Silenced"));

    let damage = catalog.get("Damage").and_then(CatalogEntry::bag).unwrap();
    assert_eq!(damage.get("value").map(String::as_str), Some("26.000000"));

    let fx = catalog.get("Fx").and_then(CatalogEntry::values).unwrap();
    assert!(fx.contains("muz_pistol"));
    assert!(catalog.get("OverrideForces").is_none());
}

#[test]
fn test_error_kinds() {
    let dir = tempfile::tempdir().unwrap();

    assert_eq!(load_document("").unwrap_err().kind(), ErrorKind::PathEmpty);
    assert_eq!(
        load_document(dir.path().join("missing.meta")).unwrap_err().kind(),
        ErrorKind::FileNotFound
    );

    let broken = dir.path().join("broken.meta");
    std::fs::write(&broken, "<CWeaponInfoBlob><Infos>").unwrap();
    assert_eq!(load_document(&broken).unwrap_err().kind(), ErrorKind::XmlSyntaxError);

    let other = dir.path().join("vehicles.meta");
    std::fs::write(&other, "<CVehicleModelInfo__InitDataList />").unwrap();
    assert_eq!(load_document(&other).unwrap_err().kind(), ErrorKind::UnsupportedDocument);

    let document = load_document(weapons_file(dir.path())).unwrap();
    assert!(matches!(
        document.template("WEAPON_MISSING"),
        Err(Error::InvalidTemplateSelection(_))
    ));

    let template = document.template("WEAPON_PISTOL").unwrap();
    assert_eq!(
        apply_edits(template, Vec::<(&str, &str)>::new()).unwrap_err().kind(),
        ErrorKind::NoEditsProvided
    );

    assert_eq!(
        "vehicle".parse::<ObjectType>().unwrap_err().kind(),
        ErrorKind::UnknownObjectType
    );
}

#[test]
fn test_deep_unknown_structure_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("peds.meta");
    std::fs::write(
        &path,
        r#"<CPedModelInfo__InitDataList>
  <InitDatas>
    <Item>
      <Name>a_m_y_deep</Name>
      <Nested><Item><Inner><Leaf>1</Leaf></Inner></Item></Nested>
    </Item>
  </InitDatas>
</CPedModelInfo__InitDataList>"#,
    )
    .unwrap();

    assert_eq!(
        load_document(&path).unwrap_err().kind(),
        ErrorKind::UnrecognizedIrregularShape
    );
}
