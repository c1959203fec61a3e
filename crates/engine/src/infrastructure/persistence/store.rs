//! Store handle: connection pool plus schema installation.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use super::schema;
use super::writer::RunWriter;

/// Storage operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed; includes the operation name for tracing.
    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization of a nested JSON column failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Handle to the SQLite reference store.
///
/// The pool is capped at a single connection: ingestion is the only writer
/// and runs alone (no concurrent readers are assumed safe during a run), so
/// the pool itself is the run-scoped exclusive lock on the store.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (or create) the store at the given SQLite URL and install the
    /// schema.
    pub async fn open(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::database("open", e))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::database("open", e))?;

        let store = Self { pool };
        store.install_schema().await?;
        Ok(store)
    }

    /// Open an in-memory store, used by tests.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::open("sqlite::memory:").await
    }

    async fn install_schema(&self) -> Result<(), StoreError> {
        for statement in schema::TABLES.iter().chain(schema::INDEXES) {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::database("install_schema", e))?;
        }
        Ok(())
    }

    /// Expose the underlying pool for read-side queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin one ingestion run's transaction.
    pub async fn begin_run(&self) -> Result<RunWriter<'_>, StoreError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::database("begin_run", e))?;
        Ok(RunWriter::new(tx))
    }
}

#[cfg(test)]
mod tests {
    use lorevault_domain::Race;

    use super::*;

    #[tokio::test]
    async fn committed_data_survives_reopening_the_store() {
        let dir = tempfile::tempdir().expect("temp dir");
        let url = format!("sqlite://{}/reference.db", dir.path().display());

        {
            let store = Store::open(&url).await.expect("open store");
            let mut writer = store.begin_run().await.expect("begin run");
            writer
                .upsert_race(&Race {
                    index: "elf".to_string(),
                    name: "Elf".to_string(),
                    ..Default::default()
                })
                .await
                .expect("write race");
            writer.commit().await.expect("commit");
        }

        let store = Store::open(&url).await.expect("reopen store");
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM races")
            .fetch_one(store.pool())
            .await
            .expect("count races");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn schema_installation_is_repeatable() {
        let store = Store::in_memory().await.expect("in-memory store");
        store.install_schema().await.expect("second install is a no-op");
    }
}
