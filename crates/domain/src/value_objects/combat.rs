//! Combat mechanics shared by weapons and monster actions.

use serde::{Deserialize, Serialize};

use super::ApiRef;

/// Dice expression plus damage type, e.g. `2d6` slashing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRoll {
    #[serde(default)]
    pub damage_dice: String,
    #[serde(default)]
    pub damage_type: ApiRef,
}

/// Normal/long reach of a ranged or thrown weapon, in feet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponRange {
    #[serde(default)]
    pub normal: i32,
    #[serde(default)]
    pub long: i32,
}

/// Saving-throw requirement attached to an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyCheck {
    #[serde(default)]
    pub dc_type: ApiRef,
    #[serde(default)]
    pub dc_value: i32,
    /// What a successful save does to the effect: `none`, `half`, `other`.
    #[serde(default)]
    pub success_type: String,
}

/// How often an action or ability can be used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionUsage {
    /// `per day`, `recharge on roll`, `recharge after rest`, ...
    #[serde(rename = "type", default)]
    pub usage_type: String,
    #[serde(default)]
    pub times: i32,
    #[serde(default)]
    pub dice: String,
    #[serde(default)]
    pub min_value: i32,
    #[serde(default)]
    pub rest_types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_decodes_per_day_shape() {
        let usage: ActionUsage =
            serde_json::from_value(serde_json::json!({"type": "per day", "times": 3}))
                .expect("valid usage");
        assert_eq!(usage.usage_type, "per day");
        assert_eq!(usage.times, 3);
        assert_eq!(usage.dice, "");
    }

    #[test]
    fn usage_decodes_recharge_shape() {
        let usage: ActionUsage = serde_json::from_value(
            serde_json::json!({"type": "recharge on roll", "dice": "1d6", "min_value": 5}),
        )
        .expect("valid usage");
        assert_eq!(usage.dice, "1d6");
        assert_eq!(usage.min_value, 5);
        assert_eq!(usage.times, 0);
    }

    #[test]
    fn difficulty_check_defaults_missing_fields() {
        let dc: DifficultyCheck = serde_json::from_value(serde_json::json!({
            "dc_type": {"index": "dex", "name": "DEX"},
            "dc_value": 15
        }))
        .expect("valid dc");
        assert_eq!(dc.dc_type.index, "dex");
        assert_eq!(dc.dc_value, 15);
        assert_eq!(dc.success_type, "");
    }
}
