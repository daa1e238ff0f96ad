//! The transit routing engine, consumed as a black box.
//!
//! The rest of the crate asks exactly two questions: which stop is
//! nearest to a point, and when does transit arrive at every stop
//! reachable from an origin. The engine is built from two opaque data
//! blobs and runs on a dedicated worker thread; requests reach it as
//! tagged variants over a channel.

mod data;
mod error;
mod precomputed;
mod service;
mod worker;

pub use data::{EngineData, EngineDataClient, EngineDataConfig, EngineDataSource};
pub use error::EngineError;
pub use precomputed::PrecomputedEngine;
pub use service::{EngineService, RoutingProvider};
pub use worker::{EngineHandle, TransitEngine};
