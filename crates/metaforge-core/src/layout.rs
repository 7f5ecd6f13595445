//! Document layouts of the output files, one per object type.

use metaforge_xml::Element;

use crate::ObjectType;

/// Where objects of one type live inside their output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLayout {
    /// Root tag.
    pub root: &'static str,
    /// `/`-separated path from the root to the element new items are appended to.
    pub anchor: &'static str,
    /// Attributes set on every appended `<Item>`.
    pub item_attributes: &'static [(&'static str, &'static str)],
    /// Empty placeholder elements placed before the anchor path in a new document.
    pub leading: &'static [&'static str],
    /// Elements (tag, text) placed after the anchor path in a new document.
    pub trailing: &'static [(&'static str, &'static str)],
}

impl DocumentLayout {
    /// Layout for an object type.
    pub fn for_type(object_type: ObjectType) -> Self {
        match object_type {
            ObjectType::Ped => Self::simple("CPedModelInfo__InitDataList", "InitDatas"),
            ObjectType::PedPersonality => {
                Self::simple("CPedModelInfo__PersonalityDataList", "PedPersonalities")
            }
            ObjectType::Weapon => Self {
                root: "CWeaponInfoBlob",
                anchor: "Infos/Item/Infos",
                item_attributes: &[("type", "CWeaponInfo")],
                leading: &[
                    "SlotNavigateOrder",
                    "SlotBestOrder",
                    "TintSpecValues",
                    "FiringPatternAliases",
                    "UpperBodyFixupExpressionData",
                    "AimingInfos",
                ],
                trailing: &[("VehicleWeaponInfos", ""), ("Name", "Custom Weapon Addons")],
            },
            ObjectType::WeaponArchetype => Self::simple("CWeaponModelInfo__InitDataList", "InitDatas"),
            ObjectType::WeaponComponent => Self::simple("CWeaponComponentInfoBlob", "Infos"),
            ObjectType::WeaponAnimation => Self::simple(
                "CWeaponAnimationsSets",
                "WeaponAnimationsSets/Item/WeaponAnimations",
            ),
            ObjectType::Loadout => Self {
                item_attributes: &[("type", "CPedLoadOut")],
                ..Self::simple("CPedInventoryLoadOutManager", "Loadouts")
            },
            ObjectType::Pickup => Self {
                item_attributes: &[("type", "CPickupData")],
                ..Self::simple("CPickupDataManager", "pickupData")
            },
        }
    }

    const fn simple(root: &'static str, anchor: &'static str) -> Self {
        Self {
            root,
            anchor,
            item_attributes: &[],
            leading: &[],
            trailing: &[],
        }
    }

    /// Minimal valid document with an empty anchor.
    pub fn skeleton(&self) -> Element {
        let anchor_chain = self
            .anchor
            .split('/')
            .filter(|s| !s.is_empty())
            .rev()
            .fold(None, |inner: Option<Element>, tag| {
                let element = Element::new(tag);
                Some(match inner {
                    Some(inner) => element.with_child(inner),
                    None => element,
                })
            });

        Element::new(self.root)
            .with_children(self.leading.iter().map(|tag| Element::new(*tag)))
            .with_children(anchor_chain)
            .with_children(
                self.trailing
                    .iter()
                    .map(|(tag, text)| Element::new(*tag).with_text(*text)),
            )
    }

    /// Empty `<Item>` wrapper for a new object.
    pub fn item(&self) -> Element {
        self.item_attributes
            .iter()
            .fold(Element::new("Item"), |e, (k, v)| e.with_attr(*k, *v))
    }
}
