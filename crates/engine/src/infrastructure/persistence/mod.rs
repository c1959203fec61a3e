//! SQLite persistence for the reference store.
//!
//! [`Store`] owns the connection pool and installs the schema; [`RunWriter`]
//! is the unit-of-work handed to the ingestion pipeline: one transaction per
//! run, committed on success, rolled back on drop.

mod schema;
mod store;
mod writer;

pub use store::{Store, StoreError};
pub use writer::RunWriter;
