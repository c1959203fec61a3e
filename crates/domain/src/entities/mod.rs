//! Entities - The records the ingestion pipeline writes into the store.
//!
//! Every entity is keyed by its source-assigned string `index`, which is the
//! join key for all cross-entity references (never the storage rowid).

mod class;
mod equipment;
mod ingestion_run;
mod monster;
mod race;
mod reference;
mod spell;

pub use class::{Class, Subclass};
pub use equipment::{Armor, Equipment, EquipmentProperty, EquipmentPropertyLink, Tool, Weapon};
pub use ingestion_run::IngestionRun;
pub use monster::{
    Monster, MonsterAction, MonsterLegendaryAction, MonsterProficiency, MonsterSpecialAbility,
};
pub use race::{Race, Subrace};
pub use reference::{Condition, DamageType, Feature, Proficiency, RaceTrait};
pub use spell::Spell;
