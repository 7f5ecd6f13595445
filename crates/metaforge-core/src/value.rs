//! Attribute values of parsed game objects.
//!
//! Every direct child of an object's `<Item>` element becomes one named
//! [`AttributeValue`]. The variant records which of the format's element shapes
//! the child had, so the value can be written back the same way.

use indexmap::IndexMap;
use metaforge_xml::Element;
#[cfg(feature = "serde")]
use serde::Serialize;

/// Attribute dictionary of an attribute-only element, in document order.
pub type Bag = IndexMap<String, String>;

/// Key under which single-valued attribute bags store their value.
pub const VALUE_KEY: &str = "value";

/// The value of one named attribute of a game object.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum AttributeValue {
    /// The element had no text, attributes or children.
    Absent,
    /// The element carried only character content.
    Text(String),
    /// The element carried only XML attributes (`value`, `ref`, `x`/`y`/`z`, ...).
    AttrBag(Bag),
    /// The element had child elements, kept verbatim.
    ItemList(Vec<Element>),
    /// Decoded `OverrideForces` structure.
    ForceOverrides(Vec<ForceEntry>),
    /// Decoded `AttachPoints` structure.
    AttachPoints(Vec<AttachEntry>),
}

impl AttributeValue {
    /// Bag with a single `value` key.
    pub fn value_bag(value: impl Into<String>) -> Self {
        let mut bag = Bag::new();
        bag.insert(VALUE_KEY.to_string(), value.into());
        Self::AttrBag(bag)
    }

    /// Item list of plain `<Item>text</Item>` elements.
    pub fn text_items<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ItemList(
            texts
                .into_iter()
                .map(|t| Element::new("Item").with_text(t))
                .collect(),
        )
    }

    /// Whether this value is [`AttributeValue::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Text content, if text-shaped.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attribute bag, if bag-shaped.
    pub fn as_bag(&self) -> Option<&Bag> {
        match self {
            Self::AttrBag(bag) => Some(bag),
            _ => None,
        }
    }

    /// Short name of the variant, used in logs and error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Text(_) => "text",
            Self::AttrBag(_) => "attribute bag",
            Self::ItemList(_) => "item list",
            Self::ForceOverrides(_) => "force overrides",
            Self::AttachPoints(_) => "attach points",
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => write!(f, ""),
            Self::Text(s) => write!(f, "{}", s),
            Self::AttrBag(bag) => {
                if let (1, Some(v)) = (bag.len(), bag.get(VALUE_KEY)) {
                    return write!(f, "{}", v);
                }
                let parts: Vec<_> = bag.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
            Self::ItemList(items) => write!(f, "Items[{}]", items.len()),
            Self::ForceOverrides(entries) => write!(f, "OverrideForces[{}]", entries.len()),
            Self::AttachPoints(entries) => write!(f, "AttachPoints[{}]", entries.len()),
        }
    }
}

/// A named parameter inside an irregular structure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Param {
    pub name: String,
    pub value: AttributeValue,
}

impl Param {
    pub fn new(name: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One `OverrideForces` entry: the item's own tag plus its parameters.
///
/// `BoneTag` carries text; every other parameter is an attribute bag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ForceEntry {
    pub tag: String,
    pub params: Vec<Param>,
}

/// One `AttachPoints` entry: a bone and the components attachable to it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AttachEntry {
    pub attach_bone: String,
    pub components: Vec<ComponentItem>,
}

/// One component under an attach point. `Name` is text, `Default` a bag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ComponentItem {
    pub params: Vec<Param>,
}

impl ComponentItem {
    /// The component's `Name` parameter.
    pub fn name(&self) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == "Name")
            .and_then(|p| p.value.as_text())
    }
}
