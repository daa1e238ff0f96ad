//! Building the isochrone polygon from stop arrivals.

use geo::{ConvexHull, CoordsIter, HaversineDestination, MultiPoint, Point, Polygon};
use tracing::debug;

use crate::domain::StopArrival;

use super::config::ReachabilityConfig;

/// Ring sample count per qualifying stop. 32 bearings keep the hull
/// within a few metres of a true circle at walking radii.
const RING_STEPS: usize = 32;

/// Build the polygon of everywhere reachable within `max_minutes`.
///
/// A stop qualifies when its arrival leaves at least the full walking
/// budget unspent. Each qualifying stop contributes a ring of points at
/// walking radius, and the hull of all rings is returned, so every
/// stop's entire walking range lies inside it. Collinear stop layouts
/// still produce a proper polygon because the rings have area. Fewer
/// than three qualifying stops yield no polygon.
pub fn build_isochrone(
    arrivals: &[StopArrival],
    max_minutes: f64,
    config: &ReachabilityConfig,
) -> Option<Polygon<f64>> {
    let cutoff = max_minutes - config.max_walk_minutes;
    let qualifying: Vec<Point<f64>> = arrivals
        .iter()
        .filter(|a| a.arrival_minutes <= cutoff)
        .map(|a| a.position.to_point())
        .collect();

    if qualifying.len() < 3 {
        debug!(
            qualifying = qualifying.len(),
            "Too few stops for an isochrone"
        );
        return None;
    }

    let radius = config.max_walk_meters();
    let ring_points: Vec<Point<f64>> = qualifying
        .iter()
        .flat_map(|center| {
            (0..RING_STEPS).map(move |step| {
                let bearing = step as f64 * 360.0 / RING_STEPS as f64;
                center.haversine_destination(bearing, radius)
            })
        })
        .collect();

    let hull = MultiPoint::from(ring_points).convex_hull();

    debug!(
        qualifying = qualifying.len(),
        hull_vertices = hull.exterior().coords_count(),
        "Isochrone built"
    );

    Some(hull)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{GeoPoint, StopId};
    use geo::Contains;
    use proptest::prelude::*;

    fn arb_stop() -> impl Strategy<Value = StopArrival> {
        (46.0f64..47.5, 6.0f64..9.0, 0.0f64..40.0, 0usize..1000).prop_map(
            |(lat, lng, minutes, n)| {
                StopArrival::new(
                    StopId::new(format!("stop-{n}")),
                    format!("Stop {n}"),
                    GeoPoint::new(lat, lng).unwrap(),
                    minutes,
                )
            },
        )
    }

    proptest! {
        #[test]
        fn hull_contains_all_qualifying_stops(
            arrivals in prop::collection::vec(arb_stop(), 0..15),
            budget in 10u32..60,
        ) {
            let config = ReachabilityConfig::default();
            let max_minutes = f64::from(budget);

            if let Some(hull) = build_isochrone(&arrivals, max_minutes, &config) {
                let cutoff = max_minutes - config.max_walk_minutes;
                for a in arrivals.iter().filter(|a| a.arrival_minutes <= cutoff) {
                    prop_assert!(hull.contains(&a.position.to_point()));
                }
            }
        }
    }
}
