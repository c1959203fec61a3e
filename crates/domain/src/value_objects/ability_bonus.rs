//! Ability-score bonus granted by a race or subrace.

use serde::{Deserialize, Serialize};

use super::ApiRef;

/// A fixed bonus to one ability score, e.g. DEX +2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBonus {
    #[serde(default)]
    pub ability_score: ApiRef,
    #[serde(default)]
    pub bonus: i32,
}
