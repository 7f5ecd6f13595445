//! Metaforge - game `.meta` object definition mapper and generator.
//!
//! This crate provides a unified interface to the Metaforge crates.
//!
//! # Crates
//!
//! - [`metaforge_xml`] - Owned XML element trees (quick-xml reader, pretty writer)
//! - [`metaforge_core`] - Object model, classifier, catalog, editor and document writer
//!
//! # Example
//!
//! ```no_run
//! use metaforge::prelude::*;
//!
//! let document = load_document("weapons.meta")?;
//! let catalog = document.catalog();
//! if let Some(flags) = catalog.get("WeaponFlags").and_then(CatalogEntry::values) {
//!     println!("{} distinct weapon flags", flags.len());
//! }
//!
//! let template = document.template("WEAPON_PISTOL")?;
//! let custom = apply_edits(template, [("Name", "WEAPON_CUSTOM")])?;
//! write_object(&custom, "out", "weap")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use metaforge_core as objects;
pub use metaforge_xml as xml;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use metaforge_core::{
        apply_edits, build_catalog, load_document, write_object, AttributeCatalog, AttributeValue,
        CatalogEntry, DocumentWriter, GameObject, LoadedDocument, ObjectType,
    };
    pub use metaforge_xml::{Element, XmlStyle};
}

pub use metaforge_core::{Error, ErrorKind, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
