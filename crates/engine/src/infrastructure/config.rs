//! Application configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::infrastructure::source::RetryPolicy;

/// Default base URL of the SRD source API.
pub const DEFAULT_API_BASE_URL: &str = "https://www.dnd5eapi.co/api";

/// Default SQLite location of the reference store.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/lorevault.db";

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the SRD source API
    pub api_base_url: String,
    /// SQLite URL of the reference store
    pub database_url: String,
    /// Retry budget for source fetches
    pub retry: RetryPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let attempts: u32 = env::var("FETCH_RETRY_ATTEMPTS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("FETCH_RETRY_ATTEMPTS must be a number")?;
        let delay_seconds: u64 = env::var("FETCH_RETRY_DELAY_SECONDS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("FETCH_RETRY_DELAY_SECONDS must be a number")?;

        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            retry: RetryPolicy {
                attempts,
                delay: Duration::from_secs(delay_seconds),
            },
        })
    }
}
