//! Loading object documents (`peds.meta`, `weapons.meta`).
//!
//! Two document roots are recognized:
//!
//! - `CPedModelInfo__InitDataList`: every `InitDatas/Item` is a ped.
//! - `CWeaponInfoBlob`: every `Item type="CWeaponInfo"` below `Infos` is a
//!   weapon. The sibling `SlotNavigateOrder` and `SlotBestOrder` elements are
//!   read into [`WeaponSlots`].
//!
//! Any failure aborts the whole load; no partial object list is returned.

use std::path::Path;

use metaforge_xml::Element;
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{build_catalog, classify, AttributeCatalog, Bag, Error, GameObject, ObjectType, Result};

/// Root tag of ped documents.
pub const PED_ROOT: &str = "CPedModelInfo__InitDataList";
/// Root tag of weapon documents.
pub const WEAPON_ROOT: &str = "CWeaponInfoBlob";
/// `type` attribute of weapon items.
pub const WEAPON_ITEM_TYPE: &str = "CWeaponInfo";

/// Kind of a recognized input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum DocumentKind {
    Peds,
    Weapons,
}

impl DocumentKind {
    /// Recognize a document by its root tag.
    pub fn from_root(tag: &str) -> Option<Self> {
        match tag {
            PED_ROOT => Some(Self::Peds),
            WEAPON_ROOT => Some(Self::Weapons),
            _ => None,
        }
    }

    /// Type of the objects this document holds.
    pub fn object_type(self) -> ObjectType {
        match self {
            Self::Peds => ObjectType::Ped,
            Self::Weapons => ObjectType::Weapon,
        }
    }
}

/// One weapon slot: an `OrderNumber` bag paired with an `Entry` text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct WeaponSlot {
    pub order_number: Bag,
    pub entry: String,
}

/// Slot ordering metadata of a weapon document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct WeaponSlots {
    /// Slots from the first group of `SlotNavigateOrder`.
    pub navigate: Vec<WeaponSlot>,
    /// Slots from `SlotBestOrder`.
    pub best: Vec<WeaponSlot>,
}

/// Objects (and weapon slot metadata) loaded from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LoadedDocument {
    kind: DocumentKind,
    objects: Vec<GameObject>,
    slots: Option<WeaponSlots>,
}

impl LoadedDocument {
    /// Kind of document.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Type of the contained objects.
    pub fn object_type(&self) -> ObjectType {
        self.kind.object_type()
    }

    /// Objects in document order.
    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// Take ownership of the objects.
    pub fn into_objects(self) -> Vec<GameObject> {
        self.objects
    }

    /// Weapon slot metadata (weapon documents only).
    pub fn slots(&self) -> Option<&WeaponSlots> {
        self.slots.as_ref()
    }

    /// Object names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(GameObject::name)
    }

    /// Find a template object by name.
    pub fn template(&self, name: &str) -> Result<&GameObject> {
        self.objects
            .iter()
            .find(|o| o.name() == name)
            .ok_or_else(|| Error::InvalidTemplateSelection(name.to_string()))
    }

    /// Catalog of observed values across all objects.
    pub fn catalog(&self) -> AttributeCatalog {
        build_catalog(&self.objects)
    }
}

/// Read and parse a document from disk.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_document(path: impl AsRef<Path>) -> Result<LoadedDocument> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::PathEmpty);
    }

    let data = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let document = parse_document(&data)?;
    info!(
        kind = ?document.kind(),
        objects = document.objects().len(),
        "loaded document"
    );
    Ok(document)
}

/// Parse a document from raw bytes.
pub fn parse_document(data: &[u8]) -> Result<LoadedDocument> {
    let root = metaforge_xml::parse_bytes(data).map_err(Error::XmlSyntax)?;
    parse_root(&root)
}

/// Extract objects from an already parsed document tree.
pub fn parse_root(root: &Element) -> Result<LoadedDocument> {
    let kind = DocumentKind::from_root(&root.tag).ok_or_else(|| Error::UnsupportedDocument {
        root: root.tag.clone(),
    })?;

    let (items, slots): (Vec<&Element>, _) = match kind {
        DocumentKind::Peds => (
            root.find_path("InitDatas")
                .map(|d| d.children_named("Item").collect())
                .unwrap_or_default(),
            None,
        ),
        DocumentKind::Weapons => (weapon_items(root), Some(weapon_slots(root))),
    };

    let objects = items
        .into_iter()
        .map(|item| GameObject::new(kind.object_type(), classify(&item.children)?))
        .collect::<Result<Vec<_>>>()?;

    for object in &objects {
        debug!(name = object.name(), attributes = object.len(), "parsed object");
    }

    Ok(LoadedDocument {
        kind,
        objects,
        slots,
    })
}

fn weapon_items(root: &Element) -> Vec<&Element> {
    root.child("Infos")
        .map(|infos| {
            infos
                .descendants()
                .filter(|e| e.tag == "Item" && e.attr("type") == Some(WEAPON_ITEM_TYPE))
                .collect()
        })
        .unwrap_or_default()
}

fn weapon_slots(root: &Element) -> WeaponSlots {
    let navigate = root
        .child("SlotNavigateOrder")
        .and_then(|order| order.children.first())
        .map(collect_slots)
        .unwrap_or_default();
    let best = root
        .child("SlotBestOrder")
        .map(collect_slots)
        .unwrap_or_default();

    WeaponSlots { navigate, best }
}

/// Pair `OrderNumber` and `Entry` descendants in document order.
fn collect_slots(group: &Element) -> Vec<WeaponSlot> {
    let mut slots = Vec::new();
    let mut order_number: Option<Bag> = None;
    let mut entry: Option<String> = None;

    for node in group.descendants() {
        match node.tag.as_str() {
            "OrderNumber" => order_number = Some(node.attributes.iter().cloned().collect()),
            "Entry" => entry = Some(node.text.clone()),
            _ => continue,
        }
        match (order_number.take(), entry.take()) {
            (Some(order_number), Some(entry)) => slots.push(WeaponSlot { order_number, entry }),
            half => (order_number, entry) = half,
        }
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AttributeValue;

    const PEDS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CPedModelInfo__InitDataList>
  <residentTxd>comp_peds_generic</residentTxd>
  <InitDatas>
    <Item>
      <Name>a_f_m_beach_01</Name>
      <PropsName>null</PropsName>
      <Pedtype>CIVFEMALE</Pedtype>
      <Sexiness value="2" />
      <Radio1 />
    </Item>
    <Item>
      <Name>a_m_y_skater_01</Name>
      <PropsName>a_m_y_skater_01_p</PropsName>
      <Pedtype>CIVMALE</Pedtype>
      <Sexiness value="0" />
      <Radio1>RADIO_01_CLASS_ROCK</Radio1>
    </Item>
  </InitDatas>
</CPedModelInfo__InitDataList>"#;

    const WEAPONS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CWeaponInfoBlob>
  <SlotNavigateOrder>
    <Item>
      <WeaponSlots>
        <Item>
          <OrderNumber value="100" />
          <Entry>SLOT_PISTOL</Entry>
        </Item>
        <Item>
          <OrderNumber value="200" />
          <Entry>SLOT_SMG</Entry>
        </Item>
      </WeaponSlots>
    </Item>
    <Item>
      <WeaponSlots>
        <Item>
          <OrderNumber value="999" />
          <Entry>SLOT_IGNORED</Entry>
        </Item>
      </WeaponSlots>
    </Item>
  </SlotNavigateOrder>
  <SlotBestOrder>
    <WeaponSlots>
      <Item>
        <OrderNumber value="50" />
        <Entry>SLOT_PISTOL</Entry>
      </Item>
    </WeaponSlots>
  </SlotBestOrder>
  <Infos>
    <Item>
      <Infos>
        <Item type="CAmmoInfo">
          <Name>AMMO_PISTOL</Name>
        </Item>
        <Item type="CWeaponInfo">
          <Name>WEAPON_PISTOL</Name>
          <Damage value="26.000000" />
          <WeaponFlags>CarriedInHand Gun CanLockonOnFoot</WeaponFlags>
        </Item>
      </Infos>
    </Item>
  </Infos>
  <Name>Pistols</Name>
</CWeaponInfoBlob>"#;

    #[test]
    fn test_parse_peds() {
        let doc = parse_document(PEDS.as_bytes()).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Peds);
        assert_eq!(doc.object_type(), ObjectType::Ped);
        assert!(doc.slots().is_none());

        let names: Vec<_> = doc.names().collect();
        assert_eq!(names, ["a_f_m_beach_01", "a_m_y_skater_01"]);

        let beach = doc.template("a_f_m_beach_01").unwrap();
        assert_eq!(beach.get("Sexiness"), Some(&AttributeValue::value_bag("2")));
        assert_eq!(beach.get("Radio1"), Some(&AttributeValue::Absent));
    }

    #[test]
    fn test_parse_weapons() {
        let doc = parse_document(WEAPONS.as_bytes()).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Weapons);
        assert_eq!(doc.objects().len(), 1);
        assert_eq!(doc.objects()[0].name(), "WEAPON_PISTOL");
        assert_eq!(doc.objects()[0].object_type(), ObjectType::Weapon);

        let slots = doc.slots().unwrap();
        let navigate: Vec<_> = slots.navigate.iter().map(|s| s.entry.as_str()).collect();
        assert_eq!(navigate, ["SLOT_PISTOL", "SLOT_SMG"]);
        assert_eq!(
            slots.navigate[1].order_number.get("value").map(String::as_str),
            Some("200")
        );
        assert_eq!(slots.best.len(), 1);
        assert_eq!(slots.best[0].entry, "SLOT_PISTOL");
    }

    #[test]
    fn test_slot_pairs_wait_for_both_halves() {
        let group = metaforge_xml::parse_str(
            r#"<SlotBestOrder><WeaponSlots>
              <Item><OrderNumber value="1" /><Entry>SLOT_A</Entry></Item>
              <Item><OrderNumber value="2" /></Item>
              <Item><Entry>SLOT_B</Entry></Item>
              <Item><OrderNumber value="3" /></Item>
            </WeaponSlots></SlotBestOrder>"#,
        )
        .unwrap();

        let slots = collect_slots(&group);
        let pairs: Vec<_> = slots
            .iter()
            .map(|s| (s.order_number.get("value").map(String::as_str), s.entry.as_str()))
            .collect();
        assert_eq!(pairs, [(Some("1"), "SLOT_A"), (Some("2"), "SLOT_B")]);
    }

    #[test]
    fn test_unknown_root() {
        let result = parse_document(b"<CVehicleModelInfo__InitDataList/>");
        assert!(matches!(
            result,
            Err(Error::UnsupportedDocument { root }) if root == "CVehicleModelInfo__InitDataList"
        ));
    }

    #[test]
    fn test_syntax_error() {
        let result = parse_document(b"<CPedModelInfo__InitDataList><InitDatas>");
        assert!(matches!(result, Err(Error::XmlSyntax(_))));
    }

    #[test]
    fn test_bad_object_aborts_whole_load() {
        let xml = r#"<CPedModelInfo__InitDataList><InitDatas>
            <Item><Name>ok</Name></Item>
            <Item><Pedtype>CIVMALE</Pedtype></Item>
        </InitDatas></CPedModelInfo__InitDataList>"#;
        assert!(matches!(
            parse_document(xml.as_bytes()),
            Err(Error::MalformedStructure { .. })
        ));
    }

    #[test]
    fn test_invalid_template() {
        let doc = parse_document(PEDS.as_bytes()).unwrap();
        assert!(matches!(
            doc.template("nobody"),
            Err(Error::InvalidTemplateSelection(n)) if n == "nobody"
        ));
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(load_document(""), Err(Error::PathEmpty)));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("peds.meta");
        assert!(matches!(load_document(&missing), Err(Error::FileNotFound(p)) if p == missing));
    }

    #[test]
    fn test_catalog_from_document() {
        let doc = parse_document(PEDS.as_bytes()).unwrap();
        let catalog = doc.catalog();
        let pedtypes = catalog.get("Pedtype").unwrap().values().unwrap();
        assert!(pedtypes.contains("CIVFEMALE"));
        assert!(pedtypes.contains("CIVMALE"));
    }
}
