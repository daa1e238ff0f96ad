//! Lazily initialized routing facade.

use chrono::NaiveTime;
use tokio::sync::OnceCell;
use tracing::info;

use crate::domain::{GeoPoint, Stop, StopArrival, StopId};

use super::data::EngineDataSource;
use super::error::EngineError;
use super::precomputed::PrecomputedEngine;
use super::worker::EngineHandle;

/// Routing queries needed by the reachability computation.
///
/// The seam that lets tests substitute canned routing answers for the
/// real engine.
pub trait RoutingProvider {
    /// Force engine initialization without issuing a query.
    async fn initialize(&self) -> Result<(), EngineError>;

    async fn find_nearest_stop(
        &self,
        point: GeoPoint,
        radius_km: f64,
    ) -> Result<Option<Stop>, EngineError>;

    async fn compute_arrivals(
        &self,
        origin: &StopId,
        departure: NaiveTime,
        max_minutes: u32,
    ) -> Result<Vec<StopArrival>, EngineError>;
}

/// Owns engine data loading and the worker thread.
///
/// The first call that needs the engine loads the data and spawns the
/// worker; concurrent callers await that same initialization rather
/// than racing their own. A failed initialization leaves the cell
/// unset, so the next call retries from scratch.
pub struct EngineService {
    source: EngineDataSource,
    handle: OnceCell<EngineHandle>,
}

impl EngineService {
    pub fn new(source: EngineDataSource) -> Self {
        Self {
            source,
            handle: OnceCell::new(),
        }
    }

    async fn engine(&self) -> Result<&EngineHandle, EngineError> {
        self.handle
            .get_or_try_init(|| async {
                info!("Initializing routing engine");
                let data = self.source.load().await?;
                let handle = EngineHandle::spawn(move || {
                    let engine = PrecomputedEngine::from_data(&data)?;
                    Ok(engine)
                })
                .await?;
                info!("Routing engine ready");
                Ok(handle)
            })
            .await
    }
}

impl RoutingProvider for EngineService {
    async fn initialize(&self) -> Result<(), EngineError> {
        self.engine().await?;
        Ok(())
    }

    async fn find_nearest_stop(
        &self,
        point: GeoPoint,
        radius_km: f64,
    ) -> Result<Option<Stop>, EngineError> {
        self.engine().await?.find_nearest_stop(point, radius_km).await
    }

    async fn compute_arrivals(
        &self,
        origin: &StopId,
        departure: NaiveTime,
        max_minutes: u32,
    ) -> Result<Vec<StopArrival>, EngineError> {
        self.engine()
            .await?
            .compute_arrivals(origin.clone(), departure, max_minutes)
            .await
    }
}
