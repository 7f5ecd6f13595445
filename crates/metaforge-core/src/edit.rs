//! Producing edited copies of template objects.

use tracing::debug;

use crate::{AttributeValue, Error, GameObject, Result};

/// Copy `template` and apply `name -> text` edits to the copy.
///
/// Bag-shaped attributes become `{"value": text}` (any other keys of the bag
/// are dropped); every other attribute becomes text. Names the template does
/// not have are appended. The template itself is never modified.
///
/// Fails with [`Error::NoEditsProvided`] when `edits` is empty, and with
/// [`Error::UnrecognizedIrregularShape`] when an edit targets `OverrideForces`
/// or `AttachPoints`.
///
/// # Example
///
/// ```
/// use indexmap::IndexMap;
/// use metaforge_core::{apply_edits, AttributeValue, GameObject, ObjectType};
///
/// let mut attrs = IndexMap::new();
/// attrs.insert("Name".to_string(), AttributeValue::Text("a_f_m_beach_01".into()));
/// attrs.insert("Sexiness".to_string(), AttributeValue::value_bag("2"));
/// let template = GameObject::new(ObjectType::Ped, attrs)?;
///
/// let custom = apply_edits(&template, [("Name", "custom_ped"), ("Sexiness", "7")])?;
/// assert_eq!(custom.name(), "custom_ped");
/// assert_eq!(custom.get("Sexiness"), Some(&AttributeValue::value_bag("7")));
/// assert_eq!(template.name(), "a_f_m_beach_01");
/// # Ok::<(), metaforge_core::Error>(())
/// ```
pub fn apply_edits<I, K, V>(template: &GameObject, edits: I) -> Result<GameObject>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let edits: Vec<(String, String)> = edits
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    if edits.is_empty() {
        return Err(Error::NoEditsProvided);
    }

    let mut object = template.clone();

    for (name, text) in edits {
        let value = match object.get(&name) {
            Some(AttributeValue::AttrBag(_)) => AttributeValue::value_bag(text),
            Some(_) => AttributeValue::Text(text),
            None => {
                debug!(attribute = %name, "appending attribute missing from template");
                AttributeValue::Text(text)
            }
        };
        object.set(name, value)?;
    }

    debug!(template = template.name(), name = object.name(), "generated object");
    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bag, ObjectType};
    use indexmap::IndexMap;

    fn template() -> GameObject {
        let mut coords = Bag::new();
        coords.insert("x".into(), "1".into());
        coords.insert("y".into(), "2".into());
        coords.insert("z".into(), "3".into());

        let mut attrs = IndexMap::new();
        attrs.insert("Name".to_string(), AttributeValue::Text("WEAPON_PISTOL".into()));
        attrs.insert("Damage".to_string(), AttributeValue::value_bag("26.000000"));
        attrs.insert("AimOffset".to_string(), AttributeValue::AttrBag(coords));
        attrs.insert("Audio".to_string(), AttributeValue::Absent);
        attrs.insert("Tags".to_string(), AttributeValue::text_items(["a"]));
        GameObject::new(ObjectType::Weapon, attrs).unwrap()
    }

    #[test]
    fn test_empty_edits_rejected() {
        let t = template();
        let before = t.clone();
        let result = apply_edits(&t, Vec::<(String, String)>::new());
        assert!(matches!(result, Err(Error::NoEditsProvided)));
        assert_eq!(t, before);
    }

    #[test]
    fn test_template_isolation() {
        let t = template();
        let custom = apply_edits(&t, [("Name", "X")]).unwrap();
        assert_eq!(custom.name(), "X");
        assert_eq!(t.name(), "WEAPON_PISTOL");
    }

    #[test]
    fn test_bag_collapse() {
        let t = template();
        let custom = apply_edits(&t, [("AimOffset", "9")]).unwrap();
        assert_eq!(custom.get("AimOffset"), Some(&AttributeValue::value_bag("9")));
        assert_eq!(t.get("AimOffset").unwrap().as_bag().unwrap().len(), 3);
    }

    #[test]
    fn test_non_bag_becomes_text() {
        let t = template();
        let custom = apply_edits(&t, [("Audio", "AUDIO_ITEM_PISTOL"), ("Tags", "b")]).unwrap();
        assert_eq!(custom.get("Audio"), Some(&AttributeValue::Text("AUDIO_ITEM_PISTOL".into())));
        assert_eq!(custom.get("Tags"), Some(&AttributeValue::Text("b".into())));
    }

    #[test]
    fn test_untouched_and_order_preserved() {
        let t = template();
        let custom = apply_edits(&t, [("Damage", "40"), ("Extra", "1")]).unwrap();
        assert_eq!(custom.get("Tags"), t.get("Tags"));
        let keys: Vec<_> = custom.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["Name", "Damage", "AimOffset", "Audio", "Tags", "Extra"]);
    }

    #[test]
    fn test_structured_attribute_not_flattened() {
        let mut t = template();
        t.set("OverrideForces", AttributeValue::ForceOverrides(Vec::new())).unwrap();
        let result = apply_edits(&t, [("OverrideForces", "BONETAG_HEAD")]);
        assert!(matches!(result, Err(Error::UnrecognizedIrregularShape(_))));
    }

    #[test]
    fn test_template_reusable() {
        let t = template();
        let a = apply_edits(&t, [("Name", "A")]).unwrap();
        let b = apply_edits(&t, [("Name", "B")]).unwrap();
        assert_eq!(a.name(), "A");
        assert_eq!(b.name(), "B");
        assert_eq!(t.name(), "WEAPON_PISTOL");
    }
}
