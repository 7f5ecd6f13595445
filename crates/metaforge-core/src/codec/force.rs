//! `OverrideForces` codec.
//!
//! ```xml
//! <OverrideForces>
//!   <Item>
//!     <BoneTag>BONETAG_HEAD</BoneTag>
//!     <ForceFront value="50.000000" />
//!     <ForceBack value="40.000000" />
//!   </Item>
//! </OverrideForces>
//! ```

use metaforge_xml::Element;

use super::{decode_param, encode_param, OVERRIDE_FORCES_TAG};
use crate::{Error, ForceEntry, Result};

/// Parameter carried as text.
pub const BONE_TAG: &str = "BoneTag";

/// Decode an `OverrideForces` element into its entries.
pub fn decode(element: &Element) -> Result<Vec<ForceEntry>> {
    element.children.iter().map(decode_entry).collect()
}

fn decode_entry(item: &Element) -> Result<ForceEntry> {
    if item.has_attributes() || item.has_text() {
        return Err(Error::malformed(
            OVERRIDE_FORCES_TAG,
            format!("<{}> wrapper carries data outside its parameters", item.tag),
        ));
    }

    let params = item
        .children
        .iter()
        .map(|p| decode_param(OVERRIDE_FORCES_TAG, p, BONE_TAG))
        .collect::<Result<Vec<_>>>()?;

    Ok(ForceEntry {
        tag: item.tag.clone(),
        params,
    })
}

/// Encode entries back into an `OverrideForces` element.
pub fn encode(entries: &[ForceEntry]) -> Result<Element> {
    let items = entries
        .iter()
        .map(|entry| {
            let params = entry
                .params
                .iter()
                .map(|p| encode_param(OVERRIDE_FORCES_TAG, p, BONE_TAG))
                .collect::<Result<Vec<_>>>()?;
            Ok(Element::new(entry.tag.as_str()).with_children(params))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Element::new(OVERRIDE_FORCES_TAG).with_children(items))
}
