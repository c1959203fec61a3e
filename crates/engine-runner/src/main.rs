//! Lorevault Engine Runner - populates the local SRD reference store.
//!
//! This crate is the *composition root* for ingestion. It assembles the
//! source gateway and the store, wires them into the pipeline, and runs
//! exactly one operation: full ingestion.

mod run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run::run().await
}
