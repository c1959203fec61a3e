//! The data ingestion pipeline.
//!
//! Turns the paginated, loosely-typed source API into the local relational
//! schema: per entity type, fetch the collection listing, fetch each item's
//! detail record, map it (absent optional fields become empty defaults),
//! resolve parent references, and upsert by index. One run is one
//! transaction; any fatal error rolls everything back.

mod error;
mod loaders;
mod pipeline;

pub use error::IngestError;
pub use pipeline::{IngestionPipeline, RunCounts, RunSummary};
