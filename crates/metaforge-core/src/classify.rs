//! Shape classification of an object's child elements.
//!
//! Each direct child of an object `<Item>` is classified, in document order,
//! by the first matching rule:
//!
//! 1. `OverrideForces` - force codec
//! 2. `AttachPoints` - attach codec
//! 3. has child elements - [`AttributeValue::ItemList`] (children kept verbatim)
//! 4. has attributes - [`AttributeValue::AttrBag`] (any text is dropped)
//! 5. has text - [`AttributeValue::Text`]
//! 6. otherwise - [`AttributeValue::Absent`]
//!
//! Item lists hold items of leaf parameters. A child nested deeper than that
//! is an irregular structure no codec knows, and the classification fails.

use indexmap::IndexMap;
use metaforge_xml::Element;
use tracing::debug;

use crate::{codec, AttributeValue, Error, Result};

/// Deepest nesting accepted for a generic item list (`list > Item > param`).
pub const MAX_LIST_DEPTH: usize = 2;

/// Classify every child element into a named attribute value.
pub fn classify(children: &[Element]) -> Result<IndexMap<String, AttributeValue>> {
    let mut attributes = IndexMap::with_capacity(children.len());

    for child in children {
        let value = classify_element(child)?;
        if attributes.insert(child.tag.clone(), value).is_some() {
            return Err(Error::malformed(
                "Item",
                format!("attribute <{}> appears more than once", child.tag),
            ));
        }
    }

    Ok(attributes)
}

/// Classify a single element.
pub fn classify_element(element: &Element) -> Result<AttributeValue> {
    if codec::is_irregular_tag(&element.tag) {
        return codec::decode(element);
    }

    if element.has_children() {
        if element.depth() > MAX_LIST_DEPTH {
            return Err(Error::UnrecognizedIrregularShape(element.tag.clone()));
        }
        return Ok(AttributeValue::ItemList(element.children.clone()));
    }

    if element.has_attributes() {
        if element.has_text() {
            debug!(tag = %element.tag, "dropping text of attribute-bearing element");
        }
        return Ok(AttributeValue::AttrBag(
            element.attributes.iter().cloned().collect(),
        ));
    }

    if element.has_text() {
        return Ok(AttributeValue::Text(element.text.clone()));
    }

    Ok(AttributeValue::Absent)
}
