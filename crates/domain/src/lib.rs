//! Lorevault Domain - SRD entity types and value objects.
//!
//! Everything in this crate is plain data: the entities the ingestion
//! pipeline writes into the reference store, and the value objects they are
//! built from. All types are serde-serializable because nested structures
//! are persisted as JSON columns and read back by the presentation layer.

pub mod entities;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    Armor, Class, Condition, DamageType, Equipment, EquipmentProperty, EquipmentPropertyLink,
    Feature, IngestionRun, Monster, MonsterAction, MonsterLegendaryAction, MonsterProficiency,
    MonsterSpecialAbility, Proficiency, Race, RaceTrait, Spell, Subclass, Subrace, Tool, Weapon,
};

pub use value_objects::{
    AbilityBonus, ActionUsage, ApiRef, ArmorClassValue, Cost, DamageRoll, DifficultyCheck,
    MonsterArmorClass, SpellDamage, WeaponRange,
};
