//! Ingestion error taxonomy.
//!
//! A missing parent class for a subclass is deliberately NOT here: that case
//! is non-fatal, logged, and the loader moves on to the next item.

use thiserror::Error;

use crate::infrastructure::persistence::StoreError;
use crate::infrastructure::source::{Resource, SourceError};

/// Fatal errors of an ingestion run. All of them abort the run and roll back
/// every write made so far.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The source exhausted its retry budget for one resource.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A mandatory parent reference points at nothing.
    #[error("{entity} '{index}' references missing {parent_entity} '{parent_index}'")]
    DanglingReference {
        entity: &'static str,
        index: String,
        parent_entity: &'static str,
        parent_index: String,
    },

    /// A detail payload did not decode into the expected wire shape.
    #[error("malformed {resource} record '{index}': {message}")]
    Decode {
        resource: &'static str,
        index: String,
        message: String,
    },

    /// The reference store refused a write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IngestError {
    pub fn dangling(
        entity: &'static str,
        index: impl ToString,
        parent_entity: &'static str,
        parent_index: impl ToString,
    ) -> Self {
        Self::DanglingReference {
            entity,
            index: index.to_string(),
            parent_entity,
            parent_index: parent_index.to_string(),
        }
    }

    pub(crate) fn decode(resource: Resource, index: impl ToString, message: impl ToString) -> Self {
        Self::Decode {
            resource: resource.path(),
            index: index.to_string(),
            message: message.to_string(),
        }
    }
}
