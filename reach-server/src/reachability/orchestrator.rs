//! Orchestrating reachability computations.

use std::sync::atomic::{AtomicU64, Ordering};

use geo::Polygon;
use tokio::sync::watch;
use tracing::debug;

use crate::domain::{Apprenticeship, GeoPoint, ReachableListing};
use crate::engine::{EngineError, RoutingProvider};

use super::config::ReachabilityConfig;
use super::isochrone::build_isochrone;
use super::matcher::match_reachable;

/// Why a computation could not produce a result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputeError {
    #[error("no transit stop within {radius_km} km of the start point")]
    NoStopNearby { radius_km: f64 },
    #[error("engine failure: {detail}")]
    Engine { detail: String },
}

impl From<EngineError> for ComputeError {
    fn from(e: EngineError) -> Self {
        Self::Engine {
            detail: e.to_string(),
        }
    }
}

/// Everything a completed computation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachabilityResult {
    /// Listings within the budget, sorted by travel time.
    pub reachable: Vec<ReachableListing>,
    /// Area reachable within the budget, when enough stops qualify.
    pub isochrone: Option<Polygon<f64>>,
}

impl ReachabilityResult {
    /// The result of a computation with nothing to compute.
    pub fn empty() -> Self {
        Self {
            reachable: Vec::new(),
            isochrone: None,
        }
    }
}

/// How a computation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputeOutcome {
    Completed(ReachabilityResult),
    /// A newer computation was issued before this one resolved. The
    /// stale result is discarded, never surfaced.
    Superseded,
}

/// Runs reachability computations and keeps the newest result.
///
/// Each call gets a sequence number at issue time. A call whose number
/// is no longer the latest at resolution time reports [`ComputeOutcome::Superseded`]
/// and publishes nothing, so a slow stale computation can never
/// overwrite a newer one.
pub struct ReachabilityService<P> {
    provider: P,
    config: ReachabilityConfig,
    issued: AtomicU64,
    latest_tx: watch::Sender<(u64, Option<ReachabilityResult>)>,
}

impl<P: RoutingProvider> ReachabilityService<P> {
    pub fn new(provider: P, config: ReachabilityConfig) -> Self {
        let (latest_tx, _) = watch::channel((0, None));
        Self {
            provider,
            config,
            issued: AtomicU64::new(0),
            latest_tx,
        }
    }

    /// Compute which listings are reachable from `start` within
    /// `max_minutes`, and the matching isochrone.
    ///
    /// A missing start point or an empty listing set completes
    /// immediately with an empty result. Failures of superseded calls
    /// are swallowed; only the latest call's failure is reported.
    pub async fn compute(
        &self,
        start: Option<GeoPoint>,
        listings: &[Apprenticeship],
        max_minutes: u32,
    ) -> Result<ComputeOutcome, ComputeError> {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(start) = start else {
            return Ok(self.resolve(seq, ReachabilityResult::empty()));
        };
        if listings.is_empty() {
            return Ok(self.resolve(seq, ReachabilityResult::empty()));
        }

        match self.run(start, listings, max_minutes).await {
            Ok(result) => Ok(self.resolve(seq, result)),
            Err(_) if self.is_stale(seq) => {
                debug!(seq, "Discarding failure of a superseded computation");
                Ok(ComputeOutcome::Superseded)
            }
            Err(e) => Err(e),
        }
    }

    /// The most recently published result, if any computation has
    /// completed yet.
    pub fn latest(&self) -> Option<ReachabilityResult> {
        self.latest_tx.borrow().1.clone()
    }

    async fn run(
        &self,
        start: GeoPoint,
        listings: &[Apprenticeship],
        max_minutes: u32,
    ) -> Result<ReachabilityResult, ComputeError> {
        self.provider.initialize().await?;

        let radius_km = self.config.nearest_stop_radius_km;
        let stop = self
            .provider
            .find_nearest_stop(start, radius_km)
            .await?
            .ok_or(ComputeError::NoStopNearby { radius_km })?;
        debug!(stop = %stop.id, name = %stop.name, "Origin stop found");

        let arrivals = self
            .provider
            .compute_arrivals(&stop.id, self.config.departure_time, max_minutes)
            .await?;

        let max_total = f64::from(max_minutes);
        Ok(ReachabilityResult {
            reachable: match_reachable(&arrivals, listings, max_total, &self.config),
            isochrone: build_isochrone(&arrivals, max_total, &self.config),
        })
    }

    fn is_stale(&self, seq: u64) -> bool {
        self.issued.load(Ordering::SeqCst) != seq
    }

    /// Publish `result` unless a newer call was issued meanwhile.
    fn resolve(&self, seq: u64, result: ReachabilityResult) -> ComputeOutcome {
        if self.is_stale(seq) {
            debug!(seq, "Discarding result of a superseded computation");
            return ComputeOutcome::Superseded;
        }

        // The guard keeps a racing publish ordered by issue number even
        // when the staleness check above passed for both calls
        self.latest_tx.send_if_modified(|current| {
            if seq > current.0 {
                *current = (seq, Some(result.clone()));
                true
            } else {
                false
            }
        });

        ComputeOutcome::Completed(result)
    }
}
