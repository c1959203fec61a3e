//! Flat reference entities: traits, features, conditions, damage types,
//! proficiencies.

use serde::{Deserialize, Serialize};

use crate::value_objects::ApiRef;

/// A racial trait, cross-referencing the races and subraces that grant it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceTrait {
    pub index: String,
    pub name: String,
    pub desc: String,
    pub races: Vec<ApiRef>,
    pub subraces: Vec<ApiRef>,
    pub url: String,
}

/// A class or subclass feature gained at a given level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub index: String,
    pub name: String,
    pub class_index: String,
    pub subclass_index: String,
    pub level: i32,
    pub optional: bool,
    pub desc: String,
    pub url: String,
}

/// A status condition (blinded, grappled, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub index: String,
    pub name: String,
    pub desc: String,
    pub url: String,
}

/// A damage type (slashing, fire, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageType {
    pub index: String,
    pub name: String,
    pub desc: String,
    pub url: String,
}

/// A proficiency (skill, saving throw, armor, tool, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Proficiency {
    pub index: String,
    pub name: String,
    /// Proficiency group as the source names it: "Skills", "Armor", ...
    pub kind: String,
    pub url: String,
}
