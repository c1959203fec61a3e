//! Assembles the adapters and executes one full ingestion run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lorevault_engine::{AppConfig, HttpSourceGateway, IngestionPipeline, Store};

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lorevault_engine=info,lorevault_engine_runner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    if let Some(dir) = database_parent_dir(&config.database_url) {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating database directory {}", dir.display()))?;
    }

    let store = Store::open(&config.database_url)
        .await
        .context("opening the reference store")?;
    let gateway = HttpSourceGateway::with_retry(&config.api_base_url, config.retry);
    let pipeline = IngestionPipeline::new(Arc::new(gateway), store);

    let summary = pipeline.run().await.context("ingestion run failed")?;
    tracing::info!(
        run_id = %summary.run_id,
        records = summary.records_written,
        monsters = summary.counts.monsters,
        spells = summary.counts.spells,
        "reference store now reflects the source"
    );
    Ok(())
}

/// Directory that must exist before SQLite can create the database file.
fn database_parent_dir(database_url: &str) -> Option<PathBuf> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    if path.starts_with(":memory:") || path.is_empty() {
        return None;
    }
    let parent = Path::new(path).parent()?;
    if parent.as_os_str().is_empty() {
        return None;
    }
    Some(parent.to_path_buf())
}
