//! Tuning knobs for the reachability computation.

use chrono::NaiveTime;

/// Parameters shared by the matcher, the isochrone builder, and the
/// orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachabilityConfig {
    /// Walking speed used to convert distance into minutes.
    pub walk_speed_m_per_min: f64,
    /// How long a walk from the final stop may take.
    pub max_walk_minutes: f64,
    /// Search radius for the origin stop around the start point.
    pub nearest_stop_radius_km: f64,
    /// Schedule time every computation departs at. The timetable has a
    /// bounded validity window, so queries use a fixed time of day
    /// rather than the current instant.
    pub departure_time: NaiveTime,
}

impl ReachabilityConfig {
    pub fn new(
        walk_speed_m_per_min: f64,
        max_walk_minutes: f64,
        nearest_stop_radius_km: f64,
        departure_time: NaiveTime,
    ) -> Self {
        Self {
            walk_speed_m_per_min,
            max_walk_minutes,
            nearest_stop_radius_km,
            departure_time,
        }
    }

    /// The farthest a listing may be from its stop.
    pub fn max_walk_meters(&self) -> f64 {
        self.walk_speed_m_per_min * self.max_walk_minutes
    }
}

impl Default for ReachabilityConfig {
    fn default() -> Self {
        Self {
            walk_speed_m_per_min: 80.0,
            max_walk_minutes: 5.0,
            nearest_stop_radius_km: 10.0,
            // 08:00 is always a valid time of day
            departure_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        }
    }
}
