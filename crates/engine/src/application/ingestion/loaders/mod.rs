//! Per-entity loaders.
//!
//! Every loader has the same shape: fetch the collection listing, fetch each
//! item's detail record, decode it (missing optional fields become empty
//! defaults), map to the domain entity, resolve parent references, upsert
//! through the run's writer. Only the mapping differs per entity type.

mod classes;
mod equipment;
mod monsters;
mod races;
mod reference;
mod spells;

pub(crate) use classes::{load_classes, load_subclasses};
pub(crate) use equipment::load_equipment;
pub(crate) use monsters::load_monsters;
pub(crate) use races::{load_races, load_subraces};
pub(crate) use reference::{
    load_conditions, load_damage_types, load_features, load_proficiencies, load_traits,
};
pub(crate) use spells::load_spells;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::IngestError;
use crate::infrastructure::source::Resource;

/// Decode one detail payload into its wire type.
pub(super) fn decode_detail<T: DeserializeOwned>(
    resource: Resource,
    index: &str,
    payload: Value,
) -> Result<T, IngestError> {
    serde_json::from_value(payload).map_err(|e| IngestError::decode(resource, index, e))
}
