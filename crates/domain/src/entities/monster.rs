//! Monster entity and its owned collections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::{ActionUsage, ApiRef, DifficultyCheck, MonsterArmorClass};

/// A monster stat block.
///
/// The four owned collections (proficiencies, actions, legendary actions,
/// special abilities) are separate records tagged with this monster's index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub index: String,
    pub name: String,
    pub size: String,
    /// Creature type: beast, dragon, undead, ...
    pub kind: String,
    pub alignment: String,
    pub armor_class: Vec<MonsterArmorClass>,
    pub hit_points: i32,
    pub hit_dice: String,
    pub hit_points_roll: String,
    /// Movement modes; values stay loosely typed because the source mixes
    /// distances ("30 ft.") with flags (`hover: true`).
    pub speed: BTreeMap<String, Value>,
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub damage_vulnerabilities: Vec<String>,
    pub damage_resistances: Vec<String>,
    pub damage_immunities: Vec<String>,
    pub condition_immunities: Vec<ApiRef>,
    /// Senses map: darkvision, passive perception, ... (numbers and text).
    pub senses: BTreeMap<String, Value>,
    pub languages: String,
    pub challenge_rating: f64,
    pub proficiency_bonus: i32,
    pub xp: i32,
    pub image: String,
    pub url: String,
}

/// A skill or save the monster is proficient in, with its bonus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterProficiency {
    pub monster_index: String,
    pub proficiency: ApiRef,
    pub value: i32,
}

/// One action from a monster's stat block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterAction {
    pub monster_index: String,
    pub name: String,
    pub desc: String,
    pub attack_bonus: Option<i32>,
    /// Damage entries stay opaque; choice-based damage makes the shape
    /// polymorphic upstream.
    pub damage: Vec<Value>,
    pub dc: Option<DifficultyCheck>,
    pub usage: Option<ActionUsage>,
    /// Set to `actions` or `action_options` for multiattacks.
    pub multiattack_type: String,
    /// Sub-action descriptors of a multiattack, stored opaquely.
    pub subactions: Vec<Value>,
}

/// A legendary action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterLegendaryAction {
    pub monster_index: String,
    pub name: String,
    pub desc: String,
    pub damage: Vec<Value>,
    pub dc: Option<DifficultyCheck>,
}

/// A passive or triggered special ability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterSpecialAbility {
    pub monster_index: String,
    pub name: String,
    pub desc: String,
    pub usage: Option<ActionUsage>,
    pub damage: Vec<Value>,
}
