//! HTTP source gateway with retry-on-transient-failure.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// The fixed set of collections the source exposes.
///
/// Collection-name validity is enforced by construction; there is no way to
/// ask the gateway for an unknown collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Races,
    Subraces,
    Spells,
    Classes,
    Subclasses,
    Traits,
    Equipment,
    Features,
    Conditions,
    DamageTypes,
    Proficiencies,
    Monsters,
}

impl Resource {
    /// URL path segment of the collection.
    pub fn path(self) -> &'static str {
        match self {
            Self::Races => "races",
            Self::Subraces => "subraces",
            Self::Spells => "spells",
            Self::Classes => "classes",
            Self::Subclasses => "subclasses",
            Self::Traits => "traits",
            Self::Equipment => "equipment",
            Self::Features => "features",
            Self::Conditions => "conditions",
            Self::DamageTypes => "damage-types",
            Self::Proficiencies => "proficiencies",
            Self::Monsters => "monsters",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One entry of a collection listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    pub index: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct CollectionListing {
    #[serde(default)]
    results: Vec<ResourceRef>,
}

/// Errors from the source gateway.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Every retry failed for one resource; fatal for the ingestion run.
    #[error("source collection '{resource}' unavailable after {attempts} attempts: {message}")]
    Unavailable {
        resource: &'static str,
        attempts: u32,
        message: String,
    },

    /// A detail record was requested with an empty index.
    #[error("empty index requested from collection '{resource}'")]
    EmptyIndex { resource: &'static str },
}

/// Retry budget for source fetches: fixed attempt count, fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    /// The documented baseline: 5 attempts, 5 seconds apart.
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(5),
        }
    }
}

/// Port to the external reference-data source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourcePort: Send + Sync {
    /// List every item of a collection as `{index, name, url}` references.
    async fn fetch_collection(&self, resource: Resource)
        -> Result<Vec<ResourceRef>, SourceError>;

    /// Fetch the full detail record for one listed item.
    ///
    /// Returns the raw JSON payload; typed decoding happens in the loaders
    /// so that missing optional fields become defaults there.
    async fn fetch_detail(&self, resource: Resource, index: &str)
        -> Result<Value, SourceError>;
}

/// Run `op` under the retry policy, returning `Unavailable` once the budget
/// is exhausted.
pub(crate) async fn with_retries<T, F, Fut>(
    resource: Resource,
    policy: RetryPolicy,
    mut op: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, String>>,
{
    let attempts = policy.attempts.max(1);
    let mut last_error = String::new();
    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(message) => {
                tracing::warn!(
                    resource = resource.path(),
                    attempt,
                    %message,
                    "source fetch failed"
                );
                last_error = message;
            }
        }
        if attempt < attempts {
            tokio::time::sleep(policy.delay).await;
        }
    }
    Err(SourceError::Unavailable {
        resource: resource.path(),
        attempts,
        message: last_error,
    })
}

/// Reqwest-backed implementation of [`SourcePort`].
///
/// One request in flight at a time, no caching, no rate-limit coordination
/// beyond the fixed retry delay: ingestion is an operator-triggered batch
/// job, not a serving path.
#[derive(Clone)]
pub struct HttpSourceGateway {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpSourceGateway {
    pub fn new(base_url: &str) -> Self {
        Self::with_retry(base_url, RetryPolicy::default())
    }

    pub fn with_retry(base_url: &str, retry: RetryPolicy) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        }
    }

    async fn fetch_json(&self, resource: Resource, path: &str) -> Result<Value, SourceError> {
        let url = format!("{}/{}", self.base_url, path);
        with_retries(resource, self.retry, || self.fetch_once(&url)).await
    }

    /// Single attempt; any transport failure or non-2xx status counts as
    /// transient and is reported as a retryable message.
    async fn fetch_once(&self, url: &str) -> Result<Value, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("unexpected status {status}"));
        }

        response.json().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl SourcePort for HttpSourceGateway {
    async fn fetch_collection(
        &self,
        resource: Resource,
    ) -> Result<Vec<ResourceRef>, SourceError> {
        let value = self.fetch_json(resource, resource.path()).await?;
        let listing: CollectionListing = serde_json::from_value(value).map_err(|e| {
            SourceError::Unavailable {
                resource: resource.path(),
                attempts: self.retry.attempts,
                message: format!("malformed collection listing: {e}"),
            }
        })?;
        Ok(listing.results)
    }

    async fn fetch_detail(&self, resource: Resource, index: &str) -> Result<Value, SourceError> {
        if index.is_empty() {
            return Err(SourceError::EmptyIndex {
                resource: resource.path(),
            });
        }
        self.fetch_json(resource, &format!("{}/{}", resource.path(), index))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn no_delay(attempts: u32) -> RetryPolicy {
        RetryPolicy {
            attempts,
            delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn retries_stop_after_exactly_the_budget() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retries(Resource::Spells, no_delay(5), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("connection refused".to_string()) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 5);
        match result {
            Err(SourceError::Unavailable {
                resource, attempts, ..
            }) => {
                assert_eq!(resource, "spells");
                assert_eq!(attempts, 5);
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn retry_recovers_from_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = with_retries(Resource::Races, no_delay(5), || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if attempt < 3 {
                    Err("timeout".to_string())
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.expect("third attempt succeeds"), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn empty_index_is_rejected_before_any_request() {
        let gateway = HttpSourceGateway::new("http://localhost:1");
        let result = gateway.fetch_detail(Resource::Monsters, "").await;
        assert!(matches!(result, Err(SourceError::EmptyIndex { .. })));
    }

    #[test]
    fn resource_paths_match_the_source_routes() {
        assert_eq!(Resource::DamageTypes.path(), "damage-types");
        assert_eq!(Resource::Equipment.path(), "equipment");
        assert_eq!(Resource::Races.to_string(), "races");
    }
}
