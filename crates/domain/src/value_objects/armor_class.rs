//! Armor class values for equipment and monsters.

use serde::{Deserialize, Serialize};

use super::ApiRef;

/// The AC block on an armor equipment record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorClassValue {
    #[serde(default)]
    pub base: i32,
    #[serde(default)]
    pub dex_bonus: bool,
    #[serde(default)]
    pub max_bonus: Option<i32>,
}

/// One entry of a monster's AC list.
///
/// Monsters can list several ACs (`natural`, `armor`, `condition`, ...);
/// armor-based entries reference the equipment that grants them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterArmorClass {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: i32,
    #[serde(default)]
    pub armor: Vec<ApiRef>,
    #[serde(default)]
    pub condition: Option<ApiRef>,
    #[serde(default)]
    pub spell: Option<ApiRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monster_armor_class_decodes_api_shape() {
        let ac: MonsterArmorClass =
            serde_json::from_value(serde_json::json!({"type": "natural", "value": 17}))
                .expect("valid AC entry");
        assert_eq!(ac.kind, "natural");
        assert_eq!(ac.value, 17);
        assert!(ac.armor.is_empty());
    }

    #[test]
    fn armor_entry_keeps_equipment_refs() {
        let ac: MonsterArmorClass = serde_json::from_value(serde_json::json!({
            "type": "armor",
            "value": 16,
            "armor": [{"index": "chain-mail", "name": "Chain Mail", "url": "/api/equipment/chain-mail"}]
        }))
        .expect("valid AC entry");
        assert_eq!(ac.armor.len(), 1);
        assert_eq!(ac.armor[0].index, "chain-mail");
    }
}
