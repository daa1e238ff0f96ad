//! The reachability computation.
//!
//! Turns a start point, a listing set, and a travel-time budget into
//! the listings reachable by transit plus walking, and the isochrone
//! polygon of the reachable area. The orchestrator serializes nothing;
//! overlapping computations race freely and sequence numbers decide
//! whose result is kept.

mod config;
mod isochrone;
mod matcher;
mod orchestrator;

pub use config::ReachabilityConfig;
pub use isochrone::build_isochrone;
pub use matcher::match_reachable;
pub use orchestrator::{ComputeError, ComputeOutcome, ReachabilityResult, ReachabilityService};
