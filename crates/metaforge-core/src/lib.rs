//! Schema-flexible object mapper for game `.meta` object definitions.
//!
//! Ped and weapon definitions are lists of `<Item>` elements whose children
//! vary from object to object. This crate loads them into [`GameObject`]s
//! without a fixed schema, catalogs the values seen per attribute, derives
//! new objects from templates and appends them to output documents.
//!
//! # Quick Start
//!
//! ```no_run
//! use metaforge_core::{apply_edits, load_document, write_object};
//!
//! let document = load_document("peds.meta")?;
//! let template = document.template("a_f_m_beach_01")?;
//!
//! let custom = apply_edits(template, [("Name", "custom_ped"), ("Sexiness", "7")])?;
//! write_object(&custom, "out", "ped")?;
//! # Ok::<(), metaforge_core::Error>(())
//! ```
//!
//! # Architecture
//!
//! - **Classifier** ([`classify`]): maps each child element to one of six
//!   [`AttributeValue`] shapes
//! - **Codecs** ([`codec`]): the two irregular nested shapes,
//!   `OverrideForces` and `AttachPoints`
//! - **Catalog** ([`AttributeCatalog`]): distinct values per attribute name
//! - **Editor** ([`apply_edits`]): deep copy of a template plus edits
//! - **Writer** ([`DocumentWriter`]): append-or-create into `<plural>.meta`
//!
//! # Attribute Shapes
//!
//! | Element | Value |
//! |---------|-------|
//! | `<OverrideForces>` | [`AttributeValue::ForceOverrides`] |
//! | `<AttachPoints>` | [`AttributeValue::AttachPoints`] |
//! | has children | [`AttributeValue::ItemList`] |
//! | has attributes | [`AttributeValue::AttrBag`] |
//! | has text | [`AttributeValue::Text`] |
//! | empty | [`AttributeValue::Absent`] |

pub mod batch;
pub mod catalog;
pub mod classify;
pub mod codec;
pub mod compose;
pub mod document;
mod edit;
mod error;
pub mod layout;
mod object;
mod value;
pub mod writer;

pub use catalog::{build_catalog, AttributeCatalog, CatalogEntry, WEAPON_FLAGS};
pub use classify::{classify, classify_element};
pub use document::{
    load_document, parse_document, parse_root, DocumentKind, LoadedDocument, WeaponSlot, WeaponSlots,
};
pub use edit::apply_edits;
pub use error::{Error, ErrorKind, Result};
pub use layout::DocumentLayout;
pub use object::{GameObject, ObjectType, NAME_ATTRIBUTE};
pub use value::{AttachEntry, AttributeValue, Bag, ComponentItem, ForceEntry, Param, VALUE_KEY};
pub use writer::{write_object, DocumentWriter};

pub use metaforge_xml::{Element, XmlStyle};
