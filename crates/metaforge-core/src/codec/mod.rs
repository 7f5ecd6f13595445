//! Codecs for the two irregular structures of the weapon format.
//!
//! `OverrideForces` and `AttachPoints` cannot be handled by the generic
//! classifier because element names at several nesting levels carry meaning.
//! Each codec has a decode half (XML to nested data) and an encode half that
//! is its exact inverse. Any other deeply nested tag is refused.

pub mod attach;
pub mod force;

use metaforge_xml::Element;

use crate::{AttributeValue, Error, Param, Result};

/// Tag of the force-override structure.
pub const OVERRIDE_FORCES_TAG: &str = "OverrideForces";
/// Tag of the attach-point structure.
pub const ATTACH_POINTS_TAG: &str = "AttachPoints";

/// Whether a tag names one of the known irregular structures.
pub fn is_irregular_tag(tag: &str) -> bool {
    tag == OVERRIDE_FORCES_TAG || tag == ATTACH_POINTS_TAG
}

/// Decode an irregular element by its tag.
pub fn decode(element: &Element) -> Result<AttributeValue> {
    match element.tag.as_str() {
        OVERRIDE_FORCES_TAG => force::decode(element).map(AttributeValue::ForceOverrides),
        ATTACH_POINTS_TAG => attach::decode(element).map(AttributeValue::AttachPoints),
        other => Err(Error::UnrecognizedIrregularShape(other.to_string())),
    }
}

/// Encode a structured value back into its element.
///
/// `name` must match the value's own structure tag.
pub fn encode(name: &str, value: &AttributeValue) -> Result<Element> {
    match (name, value) {
        (OVERRIDE_FORCES_TAG, AttributeValue::ForceOverrides(entries)) => force::encode(entries),
        (ATTACH_POINTS_TAG, AttributeValue::AttachPoints(entries)) => attach::encode(entries),
        _ => Err(Error::UnrecognizedIrregularShape(name.to_string())),
    }
}

/// Decode a leaf parameter. The parameter named `text_key` carries text,
/// all others carry attributes.
pub(crate) fn decode_param(shape: &str, element: &Element, text_key: &str) -> Result<Param> {
    if element.has_children() {
        return Err(Error::malformed(
            shape,
            format!("parameter <{}> has child elements", element.tag),
        ));
    }

    let value = if element.tag == text_key {
        if element.has_attributes() {
            return Err(Error::malformed(
                shape,
                format!("<{}> must carry text, not attributes", element.tag),
            ));
        }
        AttributeValue::Text(element.text.clone())
    } else {
        if !element.has_attributes() {
            return Err(Error::malformed(
                shape,
                format!("parameter <{}> carries no attributes", element.tag),
            ));
        }
        AttributeValue::AttrBag(element.attributes.iter().cloned().collect())
    };

    Ok(Param::new(element.tag.clone(), value))
}

/// Inverse of [`decode_param`].
pub(crate) fn encode_param(shape: &str, param: &Param, text_key: &str) -> Result<Element> {
    let element = Element::new(param.name.as_str());
    match (&param.value, param.name == text_key) {
        (AttributeValue::Text(text), true) => Ok(element.with_text(text.as_str())),
        (AttributeValue::AttrBag(bag), false) => Ok(bag
            .iter()
            .fold(element, |e, (k, v)| e.with_attr(k.as_str(), v.as_str()))),
        (other, _) => Err(Error::malformed(
            shape,
            format!("parameter <{}> cannot be written from {}", param.name, other.shape()),
        )),
    }
}
