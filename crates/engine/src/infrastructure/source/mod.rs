//! Source gateway for the SRD reference API.
//!
//! The gateway lists a collection, then fetches each item's detail record;
//! everything else (mapping, reference resolution, persistence) is the
//! ingestion pipeline's job.

mod gateway;
pub mod types;

pub use gateway::{
    HttpSourceGateway, Resource, ResourceRef, RetryPolicy, SourceError, SourcePort,
};

#[cfg(test)]
pub use gateway::MockSourcePort;
