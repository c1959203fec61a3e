//! Equipment entity and its category facets.
//!
//! Equipment is a base record; depending on category an item additionally
//! carries exactly one facet (Armor, Weapon, or Tool), linked 1:1 by the
//! equipment index. Properties are shared rows joined through
//! [`EquipmentPropertyLink`].

use serde::{Deserialize, Serialize};

use crate::value_objects::{ArmorClassValue, Cost, DamageRoll, WeaponRange};

/// Base equipment record, one per catalog item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub index: String,
    pub name: String,
    /// Category display name, e.g. "Armor", "Adventuring Gear", "Tools".
    pub equipment_category: String,
    pub cost: Cost,
    pub weight: f64,
    pub desc: Vec<String>,
    pub special: Vec<String>,
    pub url: String,
}

/// Armor facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub equipment_index: String,
    /// Light, Medium, Heavy, or Shield.
    pub armor_category: String,
    pub armor_class: ArmorClassValue,
    pub str_minimum: i32,
    pub stealth_disadvantage: bool,
}

/// Weapon facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub equipment_index: String,
    /// Simple or Martial.
    pub weapon_category: String,
    /// Melee or Ranged.
    pub weapon_range: String,
    /// Combined label, e.g. "Simple Melee".
    pub category_range: String,
    pub damage: DamageRoll,
    pub range: WeaponRange,
    pub throw_range: WeaponRange,
}

/// Tool facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub equipment_index: String,
    /// e.g. "Musical Instrument", "Artisan's Tools".
    pub tool_type: String,
}

/// A weapon/equipment property (finesse, versatile, ...), created once and
/// referenced by many items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentProperty {
    pub index: String,
    pub name: String,
    pub url: String,
}

/// Join row between an equipment item and one of its properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentPropertyLink {
    pub equipment_index: String,
    pub property_index: String,
}
