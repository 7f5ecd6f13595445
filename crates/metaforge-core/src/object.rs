//! Game objects and their types.

use std::str::FromStr;

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::codec::{is_irregular_tag, ATTACH_POINTS_TAG, OVERRIDE_FORCES_TAG};
use crate::{AttributeValue, Error, Result};

/// Attribute holding an object's name.
pub const NAME_ATTRIBUTE: &str = "Name";

/// Kind of game object, with the short key used to pick its output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ObjectType {
    Ped,
    PedPersonality,
    Weapon,
    WeaponArchetype,
    WeaponComponent,
    WeaponAnimation,
    Loadout,
    Pickup,
}

impl ObjectType {
    /// All object types, in key-table order.
    pub const ALL: [ObjectType; 8] = [
        Self::Ped,
        Self::PedPersonality,
        Self::Weapon,
        Self::WeaponArchetype,
        Self::WeaponComponent,
        Self::WeaponAnimation,
        Self::Loadout,
        Self::Pickup,
    ];

    /// Short key (`ped`, `weap`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::Ped => "ped",
            Self::PedPersonality => "pedpersona",
            Self::Weapon => "weap",
            Self::WeaponArchetype => "weaparch",
            Self::WeaponComponent => "weapcomp",
            Self::WeaponAnimation => "weapanim",
            Self::Loadout => "load",
            Self::Pickup => "pickup",
        }
    }

    /// Plural used as the output file stem.
    pub fn plural(self) -> &'static str {
        match self {
            Self::Ped => "peds",
            Self::PedPersonality => "pedpersonalities",
            Self::Weapon => "weapons",
            Self::WeaponArchetype => "weaponarchetypes",
            Self::WeaponComponent => "weaponcomponents",
            Self::WeaponAnimation => "weaponanimations",
            Self::Loadout => "loadouts",
            Self::Pickup => "pickups",
        }
    }

    /// Output file name, e.g. `peds.meta`.
    pub fn file_name(self) -> String {
        format!("{}.meta", self.plural())
    }
}

impl FromStr for ObjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| Error::UnknownObjectType(s.to_string()))
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One parsed game object (a ped, a weapon, ...).
///
/// Attributes keep document order. `Name` is always present and text-shaped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GameObject {
    object_type: ObjectType,
    attributes: IndexMap<String, AttributeValue>,
}

impl GameObject {
    /// Create an object from an ordered attribute map.
    ///
    /// Fails with [`Error::MalformedStructure`] when `Name` is missing or not text.
    pub fn new(object_type: ObjectType, attributes: IndexMap<String, AttributeValue>) -> Result<Self> {
        match attributes.get(NAME_ATTRIBUTE) {
            Some(AttributeValue::Text(_)) => {}
            Some(other) => {
                return Err(Error::malformed(
                    "Item",
                    format!("Name must be text, found {}", other.shape()),
                ))
            }
            None => return Err(Error::malformed("Item", "object has no Name")),
        }

        for (name, value) in &attributes {
            check_irregular_placement(name, value)?;
        }

        Ok(Self {
            object_type,
            attributes,
        })
    }

    /// The object's type.
    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    /// The object's name.
    pub fn name(&self) -> &str {
        self.attributes
            .get(NAME_ATTRIBUTE)
            .and_then(AttributeValue::as_text)
            .unwrap_or_default()
    }

    /// Look up an attribute.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Whether the object has an attribute with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Set an attribute, keeping its position if it already exists and
    /// appending it otherwise. Returns the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: AttributeValue) -> Result<Option<AttributeValue>> {
        let name = name.into();
        if name == NAME_ATTRIBUTE && value.as_text().is_none() {
            return Err(Error::malformed(
                "Item",
                format!("Name must be text, got {}", value.shape()),
            ));
        }
        check_irregular_placement(&name, &value)?;
        Ok(self.attributes.insert(name, value))
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> &IndexMap<String, AttributeValue> {
        &self.attributes
    }

    /// Iterate attributes in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the object has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Structured values live only under their codec's tag, and those tags hold nothing else.
fn check_irregular_placement(name: &str, value: &AttributeValue) -> Result<()> {
    let placed = match value {
        AttributeValue::ForceOverrides(_) => name == OVERRIDE_FORCES_TAG,
        AttributeValue::AttachPoints(_) => name == ATTACH_POINTS_TAG,
        _ => !is_irregular_tag(name),
    };
    if !placed {
        return Err(Error::UnrecognizedIrregularShape(name.to_string()));
    }
    Ok(())
}
