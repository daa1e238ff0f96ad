//! In-memory listings store.

use std::sync::Arc;
use tokio::sync::RwLock;

use tracing::warn;

use crate::domain::{Apprenticeship, GeoPoint};

use super::client::ListingsClient;
use super::error::ListingsError;

/// Thread-safe snapshot of the current listings, with support for
/// background refresh.
#[derive(Clone)]
pub struct ListingsStore {
    inner: Arc<RwLock<Vec<Apprenticeship>>>,
    client: ListingsClient,
}

impl ListingsStore {
    /// Create a store by fetching the feed.
    ///
    /// This will fail if the feed is unreachable.
    pub async fn fetch(client: ListingsClient) -> Result<Self, ListingsError> {
        let listings = keep_locatable(client.fetch_all().await?);

        Ok(Self {
            inner: Arc::new(RwLock::new(listings)),
            client,
        })
    }

    /// A copy of the current listings.
    pub async fn snapshot(&self) -> Vec<Apprenticeship> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Number of listings currently held.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Refresh the listings from the feed.
    ///
    /// On success, replaces the current snapshot. On failure, the
    /// existing snapshot is preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, ListingsError> {
        let listings = keep_locatable(self.client.fetch_all().await?);
        let count = listings.len();

        let mut guard = self.inner.write().await;
        *guard = listings;

        Ok(count)
    }
}

/// Drop listings whose coordinates cannot be placed on the map.
fn keep_locatable(listings: Vec<Apprenticeship>) -> Vec<Apprenticeship> {
    listings
        .into_iter()
        .filter(|l| {
            let ok = GeoPoint::new(l.lat, l.lng).is_ok();
            if !ok {
                warn!(
                    id = %l.id,
                    lat = l.lat,
                    lng = l.lng,
                    "Skipping listing with invalid coordinates"
                );
            }
            ok
        })
        .collect()
}
