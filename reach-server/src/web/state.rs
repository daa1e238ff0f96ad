//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedGeocodeClient;
use crate::engine::EngineService;
use crate::listings::ListingsStore;
use crate::reachability::ReachabilityService;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Reachability orchestrator backed by the routing engine
    pub reachability: Arc<ReachabilityService<EngineService>>,

    /// Current apprenticeship listings
    pub listings: ListingsStore,

    /// Cached geocoding client
    pub geocoder: Arc<CachedGeocodeClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        reachability: ReachabilityService<EngineService>,
        listings: ListingsStore,
        geocoder: CachedGeocodeClient,
    ) -> Self {
        Self {
            reachability: Arc::new(reachability),
            listings,
            geocoder: Arc::new(geocoder),
        }
    }
}
