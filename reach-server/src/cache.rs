//! Caching layer for geocoding responses.
//!
//! Address search is keystroke-driven, so identical queries arrive in
//! bursts while the answers change rarely. Responses are cached under
//! the normalized query text.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::geocode::{AddressMatch, GeocodeClient, GeocodeError};

/// Configuration for [`CachedGeocodeClient`].
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long cached responses stay valid.
    pub ttl: Duration,

    /// Maximum number of cached queries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            max_capacity: 10_000,
        }
    }
}

/// A [`GeocodeClient`] wrapper that caches search responses.
pub struct CachedGeocodeClient {
    client: GeocodeClient,
    cache: Cache<String, Arc<Vec<AddressMatch>>>,
}

impl CachedGeocodeClient {
    pub fn new(client: GeocodeClient, config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        Self { client, cache }
    }

    /// Search for addresses, consulting the cache first.
    ///
    /// Errors are not cached, so a failed search is retried on the next
    /// identical query.
    pub async fn search(&self, query: &str) -> Result<Arc<Vec<AddressMatch>>, GeocodeError> {
        let key = normalize_query(query);

        if let Some(matches) = self.cache.get(&key).await {
            return Ok(matches);
        }

        let matches = Arc::new(self.client.search(query).await?);
        self.cache.insert(key, matches.clone()).await;
        Ok(matches)
    }

    /// Number of cached queries, for diagnostics.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

/// Collapse the case and whitespace variations of the same query.
fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
