//! Purchase cost of an equipment item.

use serde::{Deserialize, Serialize};

/// Quantity plus currency unit (`cp`, `sp`, `gp`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub unit: String,
}
