//! Worker-thread hosting for the routing engine.
//!
//! Earliest-arrival propagation is CPU-heavy, so the engine runs on a
//! dedicated thread instead of the async runtime. Requests cross the
//! boundary as tagged variants, each carrying a oneshot reply channel;
//! building such a value is the only way to talk to the engine, so
//! malformed requests cannot reach it.

use chrono::NaiveTime;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::domain::{GeoPoint, Stop, StopArrival, StopId};

use super::error::EngineError;

/// A transit routing engine, consumed as a black box.
///
/// Implementations answer nearest-stop and earliest-arrival queries from
/// prebuilt data. The engine lives on its worker thread and is never
/// shared, so implementations need `Send` but not `Sync`.
pub trait TransitEngine: Send {
    /// Find the stop closest to `point` within `radius_km`, if any.
    fn nearest_stop(&self, point: GeoPoint, radius_km: f64) -> Result<Option<Stop>, EngineError>;

    /// Compute earliest arrivals at every stop reachable from `origin`.
    ///
    /// Arrival offsets are minutes since `departure`, confined to
    /// `[0, max_minutes]`.
    fn earliest_arrivals(
        &self,
        origin: &StopId,
        departure: NaiveTime,
        max_minutes: u32,
    ) -> Result<Vec<StopArrival>, EngineError>;
}

/// A request to the engine thread.
enum EngineRequest {
    FindNearestStop {
        point: GeoPoint,
        radius_km: f64,
        reply: oneshot::Sender<Result<Option<Stop>, EngineError>>,
    },
    ComputeArrivals {
        origin: StopId,
        departure: NaiveTime,
        max_minutes: u32,
        reply: oneshot::Sender<Result<Vec<StopArrival>, EngineError>>,
    },
}

/// Handle to the engine thread.
///
/// Cloneable; all clones talk to the same engine. Dropping the last
/// handle closes the request channel, which ends the thread.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::UnboundedSender<EngineRequest>,
}

impl EngineHandle {
    /// Spawn the engine thread.
    ///
    /// `build` runs on the new thread so that expensive data parsing
    /// never blocks the async runtime. The returned future resolves once
    /// the engine is ready, or with the error `build` produced.
    pub async fn spawn<E, F>(build: F) -> Result<Self, EngineError>
    where
        E: TransitEngine + 'static,
        F: FnOnce() -> Result<E, EngineError> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = oneshot::channel();

        std::thread::spawn(move || match build() {
            Ok(engine) => {
                // The receiver is only dropped when spawn's caller went
                // away; the worker still serves remaining handles.
                let _ = ready_tx.send(Ok(()));
                run_worker(engine, rx);
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e));
            }
        });

        match ready_rx.await {
            Ok(Ok(())) => Ok(Self { tx }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(EngineError::WorkerStopped),
        }
    }

    /// Find the stop nearest to `point` within `radius_km`.
    pub async fn find_nearest_stop(
        &self,
        point: GeoPoint,
        radius_km: f64,
    ) -> Result<Option<Stop>, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(EngineRequest::FindNearestStop {
                point,
                radius_km,
                reply,
            })
            .map_err(|_| EngineError::WorkerStopped)?;

        rx.await.map_err(|_| EngineError::WorkerStopped)?
    }

    /// Compute earliest arrivals from `origin`, bounded by `max_minutes`.
    pub async fn compute_arrivals(
        &self,
        origin: StopId,
        departure: NaiveTime,
        max_minutes: u32,
    ) -> Result<Vec<StopArrival>, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(EngineRequest::ComputeArrivals {
                origin,
                departure,
                max_minutes,
                reply,
            })
            .map_err(|_| EngineError::WorkerStopped)?;

        rx.await.map_err(|_| EngineError::WorkerStopped)?
    }
}

/// Serve requests until every handle is dropped.
fn run_worker<E: TransitEngine>(engine: E, mut rx: mpsc::UnboundedReceiver<EngineRequest>) {
    debug!("engine worker started");

    while let Some(request) = rx.blocking_recv() {
        match request {
            EngineRequest::FindNearestStop {
                point,
                radius_km,
                reply,
            } => {
                // A dropped reply receiver means the caller gave up
                let _ = reply.send(engine.nearest_stop(point, radius_km));
            }
            EngineRequest::ComputeArrivals {
                origin,
                departure,
                max_minutes,
                reply,
            } => {
                let _ = reply.send(engine.earliest_arrivals(&origin, departure, max_minutes));
            }
        }
    }

    debug!("engine worker stopping");
}
