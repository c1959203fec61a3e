//! Spell damage tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ApiRef;

/// Damage dealt by a spell: the damage type plus scaling tables.
///
/// Leveled spells scale per spell-slot level, cantrips per character level;
/// either table may be empty. Keys are the level as a decimal string, values
/// the dice expression, exactly as the source emits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellDamage {
    #[serde(default)]
    pub damage_type: Option<ApiRef>,
    #[serde(default)]
    pub damage_at_slot_level: BTreeMap<String, String>,
    #[serde(default)]
    pub damage_at_character_level: BTreeMap<String, String>,
}

impl SpellDamage {
    /// True when the source record carried no damage information at all.
    pub fn is_empty(&self) -> bool {
        self.damage_type.is_none()
            && self.damage_at_slot_level.is_empty()
            && self.damage_at_character_level.is_empty()
    }
}
