//! Race and Subrace entities.

use serde::{Deserialize, Serialize};

use crate::value_objects::{AbilityBonus, ApiRef};

/// A playable race.
///
/// Owns zero or more [`Subrace`]s through their `race_index`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub index: String,
    pub name: String,
    /// Base walking speed in feet.
    pub speed: i32,
    pub ability_bonuses: Vec<AbilityBonus>,
    pub alignment: String,
    pub age: String,
    /// Size category (Small, Medium, ...).
    pub size: String,
    pub size_description: String,
    pub starting_proficiencies: Vec<ApiRef>,
    pub languages: Vec<ApiRef>,
    pub language_desc: String,
    /// Names of the racial traits; the full trait records live in the
    /// traits table and point back at this race.
    pub traits: Vec<String>,
    pub url: String,
}

/// A variant of a race, e.g. High Elf.
///
/// `race_index` must name an existing [`Race`] at the moment the subrace is
/// written; ingestion fails the whole run otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subrace {
    pub index: String,
    pub name: String,
    pub race_index: String,
    pub desc: String,
    pub ability_bonuses: Vec<AbilityBonus>,
    pub racial_traits: Vec<ApiRef>,
    pub languages: Vec<ApiRef>,
    pub starting_proficiencies: Vec<ApiRef>,
    pub url: String,
}
