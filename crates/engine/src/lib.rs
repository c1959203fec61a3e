//! Lorevault Engine library.
//!
//! Server-side code for the SRD reference store:
//!
//! - `infrastructure/` - Source gateway, persistence, configuration
//! - `application/` - The ingestion pipeline and read-side catalog queries

pub mod application;
pub mod infrastructure;

pub use application::catalog;
pub use application::ingestion::{IngestError, IngestionPipeline, RunCounts, RunSummary};
pub use infrastructure::config::AppConfig;
pub use infrastructure::persistence::{RunWriter, Store, StoreError};
pub use infrastructure::source::{
    HttpSourceGateway, Resource, ResourceRef, RetryPolicy, SourceError, SourcePort,
};
