//! Building structured attribute values from flat, form-style rows.

use metaforge_xml::Element;

use crate::codec::force::BONE_TAG;
use crate::value::{AttachEntry, ComponentItem, ForceEntry, Param};
use crate::AttributeValue;

/// `Fx` parameters whose value lives in a `value` attribute.
pub const FX_VALUE_PARAMS: &[&str] = &[
    "MuzzleSmokeFxMinLevel",
    "MuzzleSmokeFxIncPerShot",
    "MuzzleSmokeFxDecPerSec",
    "TracerFxChanceSP",
    "TracerFxChanceMP",
    "FlashFxChanceSP",
    "FlashFxChanceMP",
    "FlashFxAltChance",
    "FlashFxScale",
    "FlashFxLightEnabled",
    "FlashFxLightCastsShadows",
    "FlashFxLightOffsetDist",
    "GroundDisturbFxEnabled",
    "GroundDisturbFxDist",
];

const FX_FIELD: &str = "Fx";

/// One force override: a bone and its ordered `(param, value)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForceRow {
    pub bone_tag: String,
    pub params: Vec<(String, String)>,
}

/// One attach point: a bone and its ordered `(component name, default)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttachRow {
    pub bone: String,
    pub components: Vec<(String, String)>,
}

/// Value of a flat list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Ordered key/value pairs, e.g. `x`, `y`, `z`.
    Coords(Vec<(String, String)>),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Compose an `OverrideForces` value.
pub fn force_overrides<I>(rows: I) -> AttributeValue
where
    I: IntoIterator<Item = ForceRow>,
{
    let entries = rows
        .into_iter()
        .map(|row| {
            let params = std::iter::once(Param::new(BONE_TAG, AttributeValue::Text(row.bone_tag)))
                .chain(
                    row.params
                        .into_iter()
                        .map(|(name, value)| Param::new(name, AttributeValue::value_bag(value))),
                )
                .collect();
            ForceEntry {
                tag: "Item".to_string(),
                params,
            }
        })
        .collect();
    AttributeValue::ForceOverrides(entries)
}

/// Compose an `AttachPoints` value.
pub fn attach_points<I>(rows: I) -> AttributeValue
where
    I: IntoIterator<Item = AttachRow>,
{
    let entries = rows
        .into_iter()
        .map(|row| AttachEntry {
            attach_bone: row.bone,
            components: row
                .components
                .into_iter()
                .map(|(name, default)| ComponentItem {
                    params: vec![
                        Param::new("Name", AttributeValue::Text(name)),
                        Param::new("Default", AttributeValue::value_bag(default)),
                    ],
                })
                .collect(),
        })
        .collect();
    AttributeValue::AttachPoints(entries)
}

/// Compose a generic item list for `field` from `(tag, value)` rows.
///
/// Coordinate rows become attributes. Under `Fx`, the parameters listed in
/// [`FX_VALUE_PARAMS`] become `value` bags; everything else becomes text.
pub fn item_list<I, K>(field: &str, rows: I) -> AttributeValue
where
    I: IntoIterator<Item = (K, FieldValue)>,
    K: Into<String>,
{
    let is_fx = field == FX_FIELD;
    let items = rows
        .into_iter()
        .map(|(tag, value)| {
            let tag = tag.into();
            match value {
                FieldValue::Text(text) if is_fx && FX_VALUE_PARAMS.contains(&tag.as_str()) => {
                    Element::new(tag).with_attr("value", text)
                }
                FieldValue::Text(text) => Element::new(tag).with_text(text),
                FieldValue::Coords(pairs) => pairs
                    .into_iter()
                    .fold(Element::new(tag), |e, (k, v)| e.with_attr(k, v)),
            }
        })
        .collect();
    AttributeValue::ItemList(items)
}
