//! `AttachPoints` codec.
//!
//! ```xml
//! <AttachPoints>
//!   <Item>
//!     <AttachBone>WAPClip</AttachBone>
//!     <Components>
//!       <Item>
//!         <Name>COMPONENT_PISTOL_CLIP_01</Name>
//!         <Default value="true" />
//!       </Item>
//!     </Components>
//!   </Item>
//! </AttachPoints>
//! ```
//!
//! Every attach item holds exactly `AttachBone` then `Components`; anything
//! else is rejected rather than reordered.

use metaforge_xml::Element;

use super::{decode_param, encode_param, ATTACH_POINTS_TAG};
use crate::{AttachEntry, ComponentItem, Error, Result};

/// Tag of the repeated wrapper element at both nesting levels.
pub const ITEM_TAG: &str = "Item";
/// First child of every attach item.
pub const ATTACH_BONE_TAG: &str = "AttachBone";
/// Second child of every attach item.
pub const COMPONENTS_TAG: &str = "Components";
/// Component parameter carried as text.
pub const NAME_TAG: &str = "Name";

/// Decode an `AttachPoints` element into its entries.
pub fn decode(element: &Element) -> Result<Vec<AttachEntry>> {
    element.children.iter().map(decode_entry).collect()
}

fn decode_entry(item: &Element) -> Result<AttachEntry> {
    expect_item(item)?;

    let [bone, components] = item.children.as_slice() else {
        return Err(Error::malformed(
            ATTACH_POINTS_TAG,
            format!(
                "attach item must hold exactly <{}> and <{}>, found {} children",
                ATTACH_BONE_TAG,
                COMPONENTS_TAG,
                item.children.len()
            ),
        ));
    };

    if bone.tag != ATTACH_BONE_TAG || components.tag != COMPONENTS_TAG {
        return Err(Error::malformed(
            ATTACH_POINTS_TAG,
            format!(
                "expected <{}> then <{}>, found <{}> then <{}>",
                ATTACH_BONE_TAG, COMPONENTS_TAG, bone.tag, components.tag
            ),
        ));
    }
    if bone.has_children() || bone.has_attributes() {
        return Err(Error::malformed(
            ATTACH_POINTS_TAG,
            format!("<{}> must carry only text", ATTACH_BONE_TAG),
        ));
    }
    if components.has_attributes() || components.has_text() {
        return Err(Error::malformed(
            ATTACH_POINTS_TAG,
            format!("<{}> must carry only items", COMPONENTS_TAG),
        ));
    }

    let components = components
        .children
        .iter()
        .map(decode_component)
        .collect::<Result<Vec<_>>>()?;

    Ok(AttachEntry {
        attach_bone: bone.text.clone(),
        components,
    })
}

fn decode_component(item: &Element) -> Result<ComponentItem> {
    expect_item(item)?;
    let params = item
        .children
        .iter()
        .map(|p| decode_param(ATTACH_POINTS_TAG, p, NAME_TAG))
        .collect::<Result<Vec<_>>>()?;
    Ok(ComponentItem { params })
}

fn expect_item(item: &Element) -> Result<()> {
    if item.tag != ITEM_TAG {
        return Err(Error::malformed(
            ATTACH_POINTS_TAG,
            format!("expected <{}>, found <{}>", ITEM_TAG, item.tag),
        ));
    }
    if item.has_attributes() || item.has_text() {
        return Err(Error::malformed(
            ATTACH_POINTS_TAG,
            format!("<{}> wrapper carries data outside its children", ITEM_TAG),
        ));
    }
    Ok(())
}

/// Encode entries back into an `AttachPoints` element.
pub fn encode(entries: &[AttachEntry]) -> Result<Element> {
    let items = entries
        .iter()
        .map(encode_entry)
        .collect::<Result<Vec<_>>>()?;
    Ok(Element::new(ATTACH_POINTS_TAG).with_children(items))
}

fn encode_entry(entry: &AttachEntry) -> Result<Element> {
    let components = entry
        .components
        .iter()
        .map(|component| {
            let params = component
                .params
                .iter()
                .map(|p| encode_param(ATTACH_POINTS_TAG, p, NAME_TAG))
                .collect::<Result<Vec<_>>>()?;
            Ok(Element::new(ITEM_TAG).with_children(params))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Element::new(ITEM_TAG)
        .with_child(Element::new(ATTACH_BONE_TAG).with_text(entry.attach_bone.as_str()))
        .with_child(Element::new(COMPONENTS_TAG).with_children(components)))
}
