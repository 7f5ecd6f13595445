//! Attribute edits gathered from an edits file and `--set` flags.
//!
//! The edits file is a JSON object. Text, number and boolean values are plain
//! edits. Arrays are rows for structured attributes:
//!
//! ```json
//! {
//!   "Name": "WEAPON_CUSTOM",
//!   "Damage": 80,
//!   "OverrideForces": [{ "BoneTag": "BONETAG_HEAD", "ForceFront": "50.0" }],
//!   "AttachPoints": [{ "AttachBone": "WAPClip", "COMPONENT_PISTOL_CLIP_01": "true" }],
//!   "Fx": [["FlashFx", "muz_pistol"], ["FlashFxScale", "1.0"], ["Offset", { "x": "0", "y": "1" }]]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use metaforge::objects::codec::attach::ATTACH_BONE_TAG;
use metaforge::objects::codec::force::BONE_TAG;
use metaforge::objects::codec::{ATTACH_POINTS_TAG, OVERRIDE_FORCES_TAG};
use metaforge::objects::compose::{self, AttachRow, FieldValue, ForceRow};
use metaforge::prelude::*;

/// Text edits plus fully built structured values.
#[derive(Debug, Default)]
pub struct Edits {
    pub text: IndexMap<String, String>,
    pub structured: IndexMap<String, AttributeValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EditValue {
    Scalar(Scalar),
    Rows(Vec<Row>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Row {
    /// `[tag, value]`, an item list entry.
    Pair(String, Field),
    /// Named fields of a force override or attach point.
    Fields(IndexMap<String, Scalar>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Field {
    Scalar(Scalar),
    Coords(IndexMap<String, Scalar>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

impl Edits {
    /// Merge edits from a JSON file with `--set` edits; `--set` wins on conflicts.
    pub fn collect(file: Option<&Path>, set: Vec<(String, String)>) -> Result<Self> {
        let mut edits = Edits::default();

        if let Some(file) = file {
            let content = fs::read_to_string(file)
                .with_context(|| format!("Failed to read edits file {}", file.display()))?;
            let values: IndexMap<String, EditValue> = serde_json::from_str(&content).context(
                "Edits file must be a JSON object of text, number, boolean or row-array values",
            )?;
            for (name, value) in values {
                match value {
                    EditValue::Scalar(scalar) => {
                        edits.text.insert(name, scalar.into_text());
                    }
                    EditValue::Rows(rows) => {
                        let value = structured_value(&name, rows)
                            .with_context(|| format!("Invalid rows for attribute {}", name))?;
                        edits.structured.insert(name, value);
                    }
                }
            }
        }

        for (name, text) in set {
            edits.structured.shift_remove(&name);
            edits.text.insert(name, text);
        }
        Ok(edits)
    }

    /// Copy `template` and apply every edit to the copy.
    pub fn apply(self, template: &GameObject) -> Result<GameObject> {
        let mut object = if self.text.is_empty() && !self.structured.is_empty() {
            template.clone()
        } else {
            apply_edits(template, self.text)?
        };

        for (name, value) in self.structured {
            debug!(attribute = %name, "setting structured attribute");
            object.set(name, value)?;
        }
        Ok(object)
    }
}

fn structured_value(name: &str, rows: Vec<Row>) -> Result<AttributeValue> {
    Ok(match name {
        OVERRIDE_FORCES_TAG => compose::force_overrides(rows.into_iter().map(force_row).collect::<Result<Vec<_>>>()?),
        ATTACH_POINTS_TAG => compose::attach_points(rows.into_iter().map(attach_row).collect::<Result<Vec<_>>>()?),
        _ => compose::item_list(name, rows.into_iter().map(list_row).collect::<Result<Vec<_>>>()?),
    })
}

fn force_row(row: Row) -> Result<ForceRow> {
    let Row::Fields(mut fields) = row else {
        bail!("expected an object with a {} field", BONE_TAG);
    };
    let bone_tag = fields
        .shift_remove(BONE_TAG)
        .with_context(|| format!("row without {}", BONE_TAG))?
        .into_text();
    Ok(ForceRow {
        bone_tag,
        params: fields.into_iter().map(|(k, v)| (k, v.into_text())).collect(),
    })
}

fn attach_row(row: Row) -> Result<AttachRow> {
    let Row::Fields(mut fields) = row else {
        bail!("expected an object with an {} field", ATTACH_BONE_TAG);
    };
    let bone = fields
        .shift_remove(ATTACH_BONE_TAG)
        .with_context(|| format!("row without {}", ATTACH_BONE_TAG))?
        .into_text();
    Ok(AttachRow {
        bone,
        components: fields.into_iter().map(|(k, v)| (k, v.into_text())).collect(),
    })
}

fn list_row(row: Row) -> Result<(String, FieldValue)> {
    match row {
        Row::Pair(tag, Field::Scalar(scalar)) => Ok((tag, FieldValue::Text(scalar.into_text()))),
        Row::Pair(tag, Field::Coords(pairs)) => Ok((
            tag,
            FieldValue::Coords(pairs.into_iter().map(|(k, v)| (k, v.into_text())).collect()),
        )),
        Row::Fields(_) => bail!("expected a [tag, value] pair"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metaforge::objects::codec;

    fn write_edits(dir: &Path, json: &str) -> std::path::PathBuf {
        let file = dir.join("edits.json");
        fs::write(&file, json).unwrap();
        file
    }

    fn pistol() -> GameObject {
        let mut attrs = IndexMap::new();
        attrs.insert("Name".to_string(), AttributeValue::Text("WEAPON_PISTOL".into()));
        attrs.insert("Damage".to_string(), AttributeValue::value_bag("26.0"));
        attrs.insert("OverrideForces".to_string(), AttributeValue::ForceOverrides(Vec::new()));
        GameObject::new(ObjectType::Weapon, attrs).unwrap()
    }

    #[test]
    fn test_set_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_edits(dir.path(), r#"{"Name": "from_file", "Sexiness": 7}"#);

        let edits = Edits::collect(Some(&file), vec![("Name".to_string(), "from_flag".to_string())]).unwrap();

        assert_eq!(edits.text.get("Name").map(String::as_str), Some("from_flag"));
        assert_eq!(edits.text.get("Sexiness").map(String::as_str), Some("7"));
        assert_eq!(edits.text.get_index(0).map(|(k, _)| k.as_str()), Some("Name"));
        assert!(edits.structured.is_empty());
    }

    #[test]
    fn test_fx_rows_become_item_list() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_edits(
            dir.path(),
            r#"{"Fx": [["FlashFx", "muz_pistol"], ["FlashFxScale", 1.5], ["Offset", {"y": "1", "x": "0"}]]}"#,
        );

        let edits = Edits::collect(Some(&file), Vec::new()).unwrap();
        assert!(edits.text.is_empty());

        let Some(AttributeValue::ItemList(items)) = edits.structured.get("Fx") else {
            panic!("expected an item list");
        };
        assert_eq!(items[0], Element::new("FlashFx").with_text("muz_pistol"));
        assert_eq!(items[1], Element::new("FlashFxScale").with_attr("value", "1.5"));
        assert_eq!(items[2], Element::new("Offset").with_attr("y", "1").with_attr("x", "0"));
    }

    #[test]
    fn test_force_rows_become_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_edits(
            dir.path(),
            r#"{
                "Name": "WEAPON_CUSTOM",
                "OverrideForces": [{"ForceFront": "50.0", "BoneTag": "BONETAG_HEAD", "ForceBack": 20}]
            }"#,
        );

        let object = Edits::collect(Some(&file), Vec::new())
            .unwrap()
            .apply(&pistol())
            .unwrap();
        assert_eq!(object.name(), "WEAPON_CUSTOM");

        let forces = object.get("OverrideForces").unwrap();
        let element = codec::encode("OverrideForces", forces).unwrap();
        let item = &element.children[0];
        assert_eq!(item.children[0].text, "BONETAG_HEAD");
        assert_eq!(item.children[1].tag, "ForceFront");
        assert_eq!(item.child("ForceBack").unwrap().attr("value"), Some("20"));
        assert_eq!(&codec::decode(&element).unwrap(), forces);
    }

    #[test]
    fn test_attach_rows_become_attach_points() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_edits(
            dir.path(),
            r#"{"AttachPoints": [{"AttachBone": "WAPClip", "COMPONENT_PISTOL_CLIP_01": true, "COMPONENT_PISTOL_CLIP_02": false}]}"#,
        );

        let object = Edits::collect(Some(&file), Vec::new())
            .unwrap()
            .apply(&pistol())
            .unwrap();
        assert_eq!(object.name(), "WEAPON_PISTOL");

        let Some(AttributeValue::AttachPoints(entries)) = object.get("AttachPoints") else {
            panic!("expected attach points");
        };
        assert_eq!(entries[0].attach_bone, "WAPClip");
        assert_eq!(entries[0].components[1].name(), Some("COMPONENT_PISTOL_CLIP_02"));
    }

    #[test]
    fn test_non_scalar_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for json in [
            r#"{"Damage": {"value": "80"}}"#,
            r#"{"Audio": null}"#,
            r#"{"Fx": [{"FlashFx": "muz_pistol"}]}"#,
            r#"{"OverrideForces": [{"ForceFront": "50.0"}]}"#,
            r#"{"AttachPoints": [["AttachBone", "WAPClip"]]}"#,
        ] {
            let file = write_edits(dir.path(), json);
            assert!(Edits::collect(Some(&file), Vec::new()).is_err(), "{}", json);
        }
    }

    #[test]
    fn test_set_replaces_structured_edit() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_edits(dir.path(), r#"{"Tags": [["Item", "a"]]}"#);

        let edits = Edits::collect(Some(&file), vec![("Tags".to_string(), "b".to_string())]).unwrap();
        assert!(edits.structured.is_empty());

        let object = edits.apply(&pistol()).unwrap();
        assert_eq!(object.get("Tags"), Some(&AttributeValue::Text("b".into())));
    }

    #[test]
    fn test_nothing_to_apply() {
        let err = Edits::default().apply(&pistol()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<metaforge::Error>().map(|e| e.kind()),
            Some(metaforge::ErrorKind::NoEditsProvided)
        );
    }
}
