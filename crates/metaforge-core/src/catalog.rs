//! Per-attribute catalog of observed values.
//!
//! The catalog feeds choice lists when editing: for every attribute name it
//! records the distinct values seen across a set of objects.

use std::collections::BTreeSet;

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::debug;

use crate::{AttributeValue, Bag, GameObject};

/// Attribute whose values are split into individual flag tokens.
pub const WEAPON_FLAGS: &str = "WeaponFlags";

/// Observed values for one attribute name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum CatalogEntry {
    /// Distinct text values (or list item texts, or flag tokens).
    Values(BTreeSet<String>),
    /// The first attribute bag seen for this name.
    Bag(Bag),
}

impl CatalogEntry {
    /// The value set, if this entry is set-shaped.
    pub fn values(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Values(set) => Some(set),
            Self::Bag(_) => None,
        }
    }

    /// The bag, if this entry is bag-shaped.
    pub fn bag(&self) -> Option<&Bag> {
        match self {
            Self::Bag(bag) => Some(bag),
            Self::Values(_) => None,
        }
    }
}

/// Attribute name to observed values, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AttributeCatalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl AttributeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for an attribute name.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Iterate entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attribute names in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record every attribute of one object.
    pub fn add_object(&mut self, object: &GameObject) {
        for (name, value) in object.iter() {
            self.add(name, value);
        }
    }

    /// Record a single attribute value.
    pub fn add(&mut self, name: &str, value: &AttributeValue) {
        match value {
            AttributeValue::Absent
            | AttributeValue::ForceOverrides(_)
            | AttributeValue::AttachPoints(_) => {}
            AttributeValue::Text(text) if name == WEAPON_FLAGS => {
                self.extend_values(name, text.split_whitespace().map(str::to_string));
            }
            AttributeValue::AttrBag(bag) => {
                if !matches!(self.entries.get(name), Some(CatalogEntry::Bag(_))) {
                    self.entries
                        .insert(name.to_string(), CatalogEntry::Bag(bag.clone()));
                }
            }
            AttributeValue::ItemList(items) => {
                self.extend_values(
                    name,
                    items
                        .iter()
                        .filter(|item| item.has_text())
                        .map(|item| item.text.clone()),
                );
            }
            AttributeValue::Text(text) => {
                self.extend_values(name, std::iter::once(text.clone()));
            }
        }
    }

    /// Merge another catalog into this one with the same first-bag-wins rule.
    pub fn merge(&mut self, other: &AttributeCatalog) {
        for (name, entry) in &other.entries {
            match entry {
                CatalogEntry::Bag(bag) => self.add(name, &AttributeValue::AttrBag(bag.clone())),
                CatalogEntry::Values(values) => self.extend_values(name, values.iter().cloned()),
            }
        }
    }

    fn extend_values(&mut self, name: &str, values: impl Iterator<Item = String>) {
        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| CatalogEntry::Values(BTreeSet::new()));

        match entry {
            CatalogEntry::Values(set) => set.extend(values),
            CatalogEntry::Bag(_) => {
                debug!(attribute = name, "ignoring scalar values for bag-shaped catalog entry");
            }
        }
    }
}

/// Build the catalog for a collection of objects.
pub fn build_catalog<'a, I>(objects: I) -> AttributeCatalog
where
    I: IntoIterator<Item = &'a GameObject>,
{
    let mut catalog = AttributeCatalog::new();
    for object in objects {
        catalog.add_object(object);
    }
    catalog
}
