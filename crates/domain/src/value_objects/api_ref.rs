//! Reference to another catalog record by its stable index.

use serde::{Deserialize, Serialize};

/// A `{index, name, url}` pointer as the source API emits it.
///
/// The index is the join key everywhere in the store; name and url are
/// carried along for display. Every field is lenient on decode so a partial
/// reference never fails a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRef {
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}
