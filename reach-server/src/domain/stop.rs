//! Transit stop types.

use std::fmt;

use super::point::GeoPoint;

/// Identifier of a transit stop.
///
/// Owned by the routing engine and treated as opaque here. The engine
/// guarantees ids are unique within one arrival table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StopId(pub String);

impl StopId {
    /// Create a stop id from a string.
    pub fn new(id: impl Into<String>) -> Self {
        StopId(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transit stop known to the routing engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Engine-owned identifier
    pub id: StopId,

    /// Human-readable stop name
    pub name: String,

    /// Stop location
    pub position: GeoPoint,
}

impl Stop {
    /// Create a new stop.
    pub fn new(id: StopId, name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            id,
            name: name.into(),
            position,
        }
    }
}

/// Earliest arrival at a stop, as an offset from the departure instant.
///
/// Produced once per computation by the routing engine; the collection
/// has no required order. `arrival_minutes` lies within the bound given
/// to the engine query.
#[derive(Debug, Clone, PartialEq)]
pub struct StopArrival {
    /// Stop this arrival refers to
    pub stop_id: StopId,

    /// Human-readable stop name
    pub name: String,

    /// Stop location
    pub position: GeoPoint,

    /// Minimum travel time from the origin, in minutes since departure
    pub arrival_minutes: f64,
}

impl StopArrival {
    /// Create a new arrival record.
    pub fn new(
        stop_id: StopId,
        name: impl Into<String>,
        position: GeoPoint,
        arrival_minutes: f64,
    ) -> Self {
        Self {
            stop_id,
            name: name.into(),
            position,
            arrival_minutes,
        }
    }
}
