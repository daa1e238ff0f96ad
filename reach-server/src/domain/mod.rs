//! Domain types for the reachability server.
//!
//! Core model types shared by the engine, the reachability computation,
//! and the web layer. Geographic values are validated at construction
//! time, so code that receives these types can trust their validity.

mod listing;
mod point;
mod stop;

pub use listing::{Apprenticeship, ReachableListing};
pub use point::{GeoPoint, InvalidCoordinate};
pub use stop::{Stop, StopArrival, StopId};
