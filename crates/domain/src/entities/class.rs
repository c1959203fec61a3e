//! Class and Subclass entities.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::ApiRef;

/// A character class.
///
/// The choice structures (`proficiency_choices`, `starting_equipment_options`,
/// `multi_classing`, `spellcasting`) are deeply polymorphic upstream and are
/// carried as pass-through JSON rather than normalized further.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub index: String,
    pub name: String,
    /// Hit die size, e.g. 12 for a d12.
    pub hit_die: i32,
    pub proficiency_choices: Value,
    pub proficiencies: Vec<ApiRef>,
    pub saving_throws: Vec<ApiRef>,
    pub starting_equipment: Value,
    pub starting_equipment_options: Value,
    pub multi_classing: Value,
    pub spellcasting: Value,
    pub url: String,
}

/// A subclass, e.g. Berserker. Skipped (with a warning) during ingestion if
/// its parent class is not present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subclass {
    pub index: String,
    pub name: String,
    pub class_index: String,
    pub url: String,
}
