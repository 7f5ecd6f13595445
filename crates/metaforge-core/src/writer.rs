//! Writing objects into their `.meta` documents.
//!
//! The destination file is `<dir>/<plural>.meta`. An existing file is parsed
//! and the new `<Item>` appended under its anchor; otherwise a skeleton
//! document is created first. The whole document is rendered in memory and
//! then persisted through a temporary file in the same directory, so a failed
//! write never leaves a truncated destination behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use metaforge_xml::{Element, XmlStyle};
use tracing::{debug, info, instrument};

use crate::layout::DocumentLayout;
use crate::{codec, AttributeValue, Error, GameObject, ObjectType, Result};

/// Writes objects into destination directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentWriter {
    style: XmlStyle,
}

impl DocumentWriter {
    /// Create a writer with a custom output style.
    pub fn new(style: XmlStyle) -> Self {
        Self { style }
    }

    /// Append `object` to the `object_type` document in `destination`.
    ///
    /// Returns the path of the written document.
    #[instrument(skip_all, fields(name = object.name(), object_type = %object_type))]
    pub fn write(&self, object: &GameObject, destination: &Path, object_type: ObjectType) -> Result<PathBuf> {
        let path = destination.join(object_type.file_name());
        let layout = DocumentLayout::for_type(object_type);

        let existing = read_existing(&path)?;
        let appended = existing.is_some();
        let root = append_object(existing, object, &layout)?;

        let bytes = metaforge_xml::to_xml_bytes(&root, self.style).map_err(|source| Error::Serialize {
            path: path.clone(),
            source,
        })?;
        persist(destination, &path, &bytes)?;

        info!(
            path = %path.display(),
            appended,
            "wrote object"
        );
        Ok(path)
    }
}

/// Append `object` to the document for `object_type_key` (`ped`, `weap`, ...)
/// inside `destination`, using the default output style.
///
/// An unknown key fails with [`Error::UnknownObjectType`] before any file is touched.
pub fn write_object(object: &GameObject, destination: impl AsRef<Path>, object_type_key: &str) -> Result<PathBuf> {
    let object_type: ObjectType = object_type_key.parse()?;
    DocumentWriter::default().write(object, destination.as_ref(), object_type)
}

/// Append an object's `<Item>` to `existing`, or to a fresh skeleton.
pub fn append_object(existing: Option<Element>, object: &GameObject, layout: &DocumentLayout) -> Result<Element> {
    let mut root = match existing {
        Some(root) => {
            if root.tag != layout.root {
                return Err(Error::UnsupportedDocument { root: root.tag });
            }
            root
        }
        None => {
            debug!(root = layout.root, "creating document skeleton");
            layout.skeleton()
        }
    };

    let item = object_element(object, layout.item())?;
    let anchor = root
        .find_path_mut(layout.anchor)
        .ok_or_else(|| Error::malformed(layout.root, format!("missing anchor {}", layout.anchor)))?;
    anchor.children.push(item);

    Ok(root)
}

/// Fill an `<Item>` wrapper with one child element per attribute.
pub fn object_element(object: &GameObject, item: Element) -> Result<Element> {
    let children = object
        .iter()
        .map(|(name, value)| attribute_element(name, value))
        .collect::<Result<Vec<_>>>()?;
    Ok(item.with_children(children))
}

/// Element for a single attribute.
pub fn attribute_element(name: &str, value: &AttributeValue) -> Result<Element> {
    let element = Element::new(name);
    match value {
        AttributeValue::Absent => Ok(element),
        AttributeValue::Text(text) => Ok(element.with_text(text.as_str())),
        AttributeValue::AttrBag(bag) => Ok(bag
            .iter()
            .fold(element, |e, (k, v)| e.with_attr(k.as_str(), v.as_str()))),
        AttributeValue::ItemList(items) => Ok(element.with_children(items.iter().cloned())),
        AttributeValue::ForceOverrides(_) | AttributeValue::AttachPoints(_) => codec::encode(name, value),
    }
}

fn read_existing(path: &Path) -> Result<Option<Element>> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(Error::WriteIo {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    metaforge_xml::parse_bytes(&data)
        .map(Some)
        .map_err(Error::XmlSyntax)
}

fn persist(destination: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let write_io = |source| Error::WriteIo {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(destination).map_err(write_io)?;
    tmp.write_all(bytes).map_err(write_io)?;
    tmp.as_file().sync_all().map_err(write_io)?;
    tmp.persist(path).map_err(|e| write_io(e.error))?;
    Ok(())
}
