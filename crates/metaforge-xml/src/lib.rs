//! Owned XML element trees for game `.meta` documents.
//!
//! Game configuration files (`peds.meta`, `weapons.meta`, ...) are small
//! pretty-printed XML documents that are also edited by hand. This crate reads
//! them into a plain [`Element`] tree and writes trees back with a stable,
//! diff-friendly layout: UTF-8, an XML declaration and two-space indentation.
//! Comments and processing instructions survive a read/write cycle; only
//! whitespace between elements is normalized.
//!
//! # Example
//!
//! ```
//! use metaforge_xml::{parse_str, to_xml_string, Element, XmlStyle};
//!
//! let mut root = parse_str("<CPedModelInfo__InitDataList><InitDatas/></CPedModelInfo__InitDataList>")?;
//! root.find_path_mut("InitDatas")
//!     .unwrap()
//!     .children
//!     .push(Element::new("Item").with_child(Element::new("Name").with_text("custom_ped")));
//!
//! let xml = to_xml_string(&root, XmlStyle::default())?;
//! assert!(xml.contains("<Name>custom_ped</Name>"));
//! # Ok::<(), metaforge_xml::Error>(())
//! ```

mod element;
mod error;
mod reader;
mod writer;

pub use element::{Descendants, Element, Misc};
pub use error::{Error, Result};
pub use reader::{parse_bytes, parse_str};
pub use writer::{to_xml_bytes, to_xml_string, write_document, XmlStyle};
