//! Spell entity.

use serde::{Deserialize, Serialize};

use crate::value_objects::{ApiRef, SpellDamage};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub index: String,
    pub name: String,
    pub desc: Vec<String>,
    /// Extra effect text when cast with a higher-level slot.
    pub higher_level: Vec<String>,
    pub range: String,
    /// Component letters: V, S, M.
    pub components: Vec<String>,
    pub material: String,
    pub duration: String,
    pub concentration: bool,
    pub casting_time: String,
    /// Spell level; 0 for cantrips.
    pub level: i32,
    pub attack_type: String,
    pub damage: SpellDamage,
    pub school: Option<ApiRef>,
    /// Classes and subclasses that can cast this spell.
    pub classes: Vec<ApiRef>,
    pub subclasses: Vec<ApiRef>,
    pub url: String,
}
