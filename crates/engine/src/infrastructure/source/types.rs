//! Wire-format types for the SRD source API detail payloads.
//!
//! Every optional field carries `#[serde(default)]`: a key missing from the
//! payload decodes to its empty default (empty list, empty map, zero, empty
//! string, `false`) instead of failing the run. Only `index`, `name`, and
//! mandatory parent references are required.

use std::collections::BTreeMap;

use lorevault_domain::{
    AbilityBonus, ActionUsage, ApiRef, ArmorClassValue, Cost, DamageRoll, DifficultyCheck,
    MonsterArmorClass, SpellDamage, WeaponRange,
};
use serde::Deserialize;
use serde_json::Value;

fn empty_array() -> Value {
    Value::Array(Vec::new())
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

fn generic_tool() -> String {
    "Generic".to_string()
}

#[derive(Debug, Deserialize)]
pub struct RaceDetail {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub ability_bonuses: Vec<AbilityBonus>,
    #[serde(default)]
    pub alignment: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub size_description: String,
    #[serde(default)]
    pub starting_proficiencies: Vec<ApiRef>,
    #[serde(default)]
    pub languages: Vec<ApiRef>,
    #[serde(default)]
    pub language_desc: String,
    #[serde(default)]
    pub traits: Vec<ApiRef>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SubraceDetail {
    pub index: String,
    pub name: String,
    /// The owning race; mandatory, a subrace cannot exist without one.
    pub race: ApiRef,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub ability_bonuses: Vec<AbilityBonus>,
    #[serde(default)]
    pub racial_traits: Vec<ApiRef>,
    #[serde(default)]
    pub languages: Vec<ApiRef>,
    #[serde(default)]
    pub starting_proficiencies: Vec<ApiRef>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SpellDetail {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub desc: Vec<String>,
    #[serde(default)]
    pub higher_level: Vec<String>,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub concentration: bool,
    #[serde(default)]
    pub casting_time: String,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub attack_type: String,
    #[serde(default)]
    pub damage: SpellDamage,
    #[serde(default)]
    pub school: Option<ApiRef>,
    #[serde(default)]
    pub classes: Vec<ApiRef>,
    #[serde(default)]
    pub subclasses: Vec<ApiRef>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ClassDetail {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub hit_die: i32,
    #[serde(default = "empty_array")]
    pub proficiency_choices: Value,
    #[serde(default)]
    pub proficiencies: Vec<ApiRef>,
    #[serde(default)]
    pub saving_throws: Vec<ApiRef>,
    #[serde(default = "empty_array")]
    pub starting_equipment: Value,
    #[serde(default = "empty_array")]
    pub starting_equipment_options: Value,
    #[serde(default = "empty_object")]
    pub multi_classing: Value,
    #[serde(default = "empty_object")]
    pub spellcasting: Value,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SubclassDetail {
    pub index: String,
    pub name: String,
    /// The owning class; the record is skipped when it is not in the store.
    pub class: ApiRef,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct TraitDetail {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub desc: Vec<String>,
    #[serde(default)]
    pub races: Vec<ApiRef>,
    #[serde(default)]
    pub subraces: Vec<ApiRef>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct EquipmentDetail {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub equipment_category: ApiRef,
    #[serde(default)]
    pub cost: Cost,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub desc: Vec<String>,
    #[serde(default)]
    pub special: Vec<String>,
    #[serde(default)]
    pub url: String,

    // Armor facet fields
    #[serde(default)]
    pub armor_category: Option<String>,
    #[serde(default)]
    pub armor_class: ArmorClassValue,
    #[serde(default)]
    pub str_minimum: i32,
    #[serde(default)]
    pub stealth_disadvantage: bool,

    // Weapon facet fields
    #[serde(default)]
    pub weapon_category: Option<String>,
    #[serde(default)]
    pub weapon_range: String,
    #[serde(default)]
    pub category_range: String,
    #[serde(default)]
    pub damage: DamageRoll,
    #[serde(default)]
    pub range: WeaponRange,
    #[serde(default)]
    pub throw_range: WeaponRange,

    // Tool facet fields
    #[serde(default = "generic_tool")]
    pub tool_category: String,

    #[serde(default)]
    pub properties: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureDetail {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub class: ApiRef,
    #[serde(default)]
    pub subclass: ApiRef,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub desc: Vec<String>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ConditionDetail {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub desc: Vec<String>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct DamageTypeDetail {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub desc: Vec<String>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ProficiencyDetail {
    pub index: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct MonsterDetail {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub alignment: String,
    #[serde(default)]
    pub armor_class: Vec<MonsterArmorClass>,
    #[serde(default)]
    pub hit_points: i32,
    #[serde(default)]
    pub hit_dice: String,
    #[serde(default)]
    pub hit_points_roll: String,
    #[serde(default)]
    pub speed: BTreeMap<String, Value>,
    #[serde(default)]
    pub strength: i32,
    #[serde(default)]
    pub dexterity: i32,
    #[serde(default)]
    pub constitution: i32,
    #[serde(default)]
    pub intelligence: i32,
    #[serde(default)]
    pub wisdom: i32,
    #[serde(default)]
    pub charisma: i32,
    #[serde(default)]
    pub damage_vulnerabilities: Vec<String>,
    #[serde(default)]
    pub damage_resistances: Vec<String>,
    #[serde(default)]
    pub damage_immunities: Vec<String>,
    #[serde(default)]
    pub condition_immunities: Vec<ApiRef>,
    #[serde(default)]
    pub senses: BTreeMap<String, Value>,
    #[serde(default)]
    pub languages: String,
    #[serde(default)]
    pub challenge_rating: f64,
    #[serde(default)]
    pub proficiency_bonus: i32,
    #[serde(default)]
    pub xp: i32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub proficiencies: Vec<MonsterProficiencyEntry>,
    #[serde(default)]
    pub actions: Vec<MonsterActionEntry>,
    #[serde(default)]
    pub legendary_actions: Vec<MonsterLegendaryActionEntry>,
    #[serde(default)]
    pub special_abilities: Vec<MonsterSpecialAbilityEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MonsterProficiencyEntry {
    #[serde(default)]
    pub value: i32,
    #[serde(default)]
    pub proficiency: ApiRef,
}

#[derive(Debug, Deserialize)]
pub struct MonsterActionEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub attack_bonus: Option<i32>,
    #[serde(default)]
    pub damage: Vec<Value>,
    #[serde(default)]
    pub dc: Option<DifficultyCheck>,
    #[serde(default)]
    pub usage: Option<ActionUsage>,
    #[serde(default)]
    pub multiattack_type: String,
    /// Sub-action descriptors of a multiattack; kept opaque.
    #[serde(rename = "actions", default)]
    pub subactions: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct MonsterLegendaryActionEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub damage: Vec<Value>,
    #[serde(default)]
    pub dc: Option<DifficultyCheck>,
}

#[derive(Debug, Deserialize)]
pub struct MonsterSpecialAbilityEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub usage: Option<ActionUsage>,
    #[serde(default)]
    pub damage: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn spell_without_optional_fields_decodes_to_defaults() {
        let detail: SpellDetail = serde_json::from_value(json!({
            "index": "mending",
            "name": "Mending"
        }))
        .expect("minimal spell decodes");

        assert!(detail.higher_level.is_empty());
        assert!(detail.damage.is_empty());
        assert!(!detail.concentration);
        assert_eq!(detail.level, 0);
        assert!(detail.school.is_none());
    }

    #[test]
    fn class_pass_through_blobs_default_to_empty_containers() {
        let detail: ClassDetail = serde_json::from_value(json!({
            "index": "monk",
            "name": "Monk"
        }))
        .expect("minimal class decodes");

        assert_eq!(detail.proficiency_choices, json!([]));
        assert_eq!(detail.multi_classing, json!({}));
    }

    #[test]
    fn monster_speed_tolerates_mixed_value_types() {
        let detail: MonsterDetail = serde_json::from_value(json!({
            "index": "ghost",
            "name": "Ghost",
            "speed": {"walk": "0 ft.", "fly": "40 ft.", "hover": true}
        }))
        .expect("monster with hover flag decodes");

        assert_eq!(detail.speed.len(), 3);
        assert_eq!(detail.speed["hover"], json!(true));
    }

    #[test]
    fn equipment_tool_category_falls_back_to_generic() {
        let detail: EquipmentDetail = serde_json::from_value(json!({
            "index": "dice-set",
            "name": "Dice Set",
            "equipment_category": {"index": "tools", "name": "Tools"}
        }))
        .expect("minimal equipment decodes");

        assert_eq!(detail.tool_category, "Generic");
        assert!(detail.armor_category.is_none());
        assert!(detail.weapon_category.is_none());
    }

    #[test]
    fn subrace_without_parent_race_is_rejected() {
        let result = serde_json::from_value::<SubraceDetail>(json!({
            "index": "stray",
            "name": "Stray"
        }));
        assert!(result.is_err());
    }
}
