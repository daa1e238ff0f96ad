use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use reach_server::cache::{CacheConfig, CachedGeocodeClient};
use reach_server::engine::{EngineDataClient, EngineDataConfig, EngineDataSource, EngineService};
use reach_server::geocode::{GeocodeClient, GeocodeConfig};
use reach_server::listings::{ListingsClient, ListingsStore};
use reach_server::reachability::{ReachabilityConfig, ReachabilityService};
use reach_server::web::{AppState, create_router};

/// How often to refresh the listings feed (24 hours).
const LISTINGS_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

const DEFAULT_TIMETABLE_URL: &str = "http://localhost:8080/data/timetable.bin";
const DEFAULT_STOPS_URL: &str = "http://localhost:8080/data/stops.bin";
const DEFAULT_LISTINGS_URL: &str = "http://localhost:8080/data/apprenticeships.json";

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let timetable_url = std::env::var("ENGINE_TIMETABLE_URL").unwrap_or_else(|_| {
        warn!("ENGINE_TIMETABLE_URL not set, using {DEFAULT_TIMETABLE_URL}");
        DEFAULT_TIMETABLE_URL.to_string()
    });
    let stops_url = std::env::var("ENGINE_STOPS_URL").unwrap_or_else(|_| {
        warn!("ENGINE_STOPS_URL not set, using {DEFAULT_STOPS_URL}");
        DEFAULT_STOPS_URL.to_string()
    });
    let listings_url = std::env::var("LISTINGS_URL").unwrap_or_else(|_| {
        warn!("LISTINGS_URL not set, using {DEFAULT_LISTINGS_URL}");
        DEFAULT_LISTINGS_URL.to_string()
    });

    // Engine data is fetched lazily on the first computation
    let data_client = EngineDataClient::new(EngineDataConfig::new(timetable_url, stops_url))
        .expect("Failed to create engine data client");
    let engine = EngineService::new(EngineDataSource::Remote(data_client));
    let reachability = ReachabilityService::new(engine, ReachabilityConfig::default());

    // Fetch listings (fail fast if unavailable)
    info!("Fetching apprenticeship listings");
    let listings_client =
        ListingsClient::new(listings_url).expect("Failed to create listings client");
    let listings = ListingsStore::fetch(listings_client)
        .await
        .expect("Failed to fetch listings");
    info!(count = listings.len().await, "Listings loaded");

    // Spawn background task to refresh listings daily
    let listings_refresh = listings.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LISTINGS_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match listings_refresh.refresh().await {
                Ok(count) => info!(count, "Refreshed listings"),
                Err(e) => error!(error = %e, "Failed to refresh listings"),
            }
        }
    });

    let geocode_client =
        GeocodeClient::new(GeocodeConfig::default()).expect("Failed to create geocode client");
    let geocoder = CachedGeocodeClient::new(geocode_client, &CacheConfig::default());

    let state = AppState::new(reachability, listings, geocoder);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .expect("Invalid BIND_ADDR");
    info!(%addr, "Reachability server listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
