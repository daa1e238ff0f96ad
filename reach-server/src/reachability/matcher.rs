//! Matching listings against stop arrival times.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{Apprenticeship, GeoPoint, ReachableListing, StopArrival};

use super::config::ReachabilityConfig;

/// Decide which listings are reachable within the travel-time budget.
///
/// A listing qualifies when some arrival stop lies within walking range
/// and transit time plus walking time fits the budget. Among qualifying
/// stops the one with the smallest total wins; on a tie the stop
/// earlier in `arrivals` is kept. Listings repeating an earlier id are
/// dropped, as are listings whose coordinates are out of range. The
/// result is sorted by travel time, ascending.
pub fn match_reachable(
    arrivals: &[StopArrival],
    listings: &[Apprenticeship],
    max_total_minutes: f64,
    config: &ReachabilityConfig,
) -> Vec<ReachableListing> {
    let max_walk_meters = config.max_walk_meters();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut reachable = Vec::new();

    for listing in listings {
        if !seen.insert(listing.id.as_str()) {
            continue;
        }
        let Ok(position) = GeoPoint::new(listing.lat, listing.lng) else {
            continue;
        };

        let mut best: Option<(f64, &StopArrival)> = None;
        for stop in arrivals {
            let distance = stop.position.distance_meters(&position);
            if distance > max_walk_meters {
                continue;
            }
            let total = stop.arrival_minutes + distance / config.walk_speed_m_per_min;
            if total > max_total_minutes {
                continue;
            }
            // Strict comparison: the first stop to reach the minimum wins
            if best.as_ref().is_none_or(|(t, _)| total < *t) {
                best = Some((total, stop));
            }
        }

        if let Some((total, stop)) = best {
            reachable.push(ReachableListing {
                listing: listing.clone(),
                travel_time_minutes: total.round() as u32,
                nearest_stop_name: stop.name.clone(),
            });
        }
    }

    reachable.sort_by_key(|r| r.travel_time_minutes);

    debug!(
        listings = listings.len(),
        arrivals = arrivals.len(),
        reachable = reachable.len(),
        "Reachability match complete"
    );

    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;
    use geo::HaversineDestination;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    fn stop(id: &str, minutes: f64, position: GeoPoint) -> StopArrival {
        StopArrival::new(StopId::new(id), id.to_uppercase(), position, minutes)
    }

    fn listing_at(id: &str, position: GeoPoint) -> Apprenticeship {
        Apprenticeship {
            id: id.to_string(),
            company: "Muster AG".to_string(),
            job: "Informatiker/in EFZ".to_string(),
            canton: "BE".to_string(),
            city: "Bern".to_string(),
            lat: position.lat(),
            lng: position.lng(),
            address: "Musterstrasse 1".to_string(),
            postal: "3000".to_string(),
            positions: 1,
            contact_email: "hr@example.ch".to_string(),
            contact_phone: "+41 31 000 00 00".to_string(),
            start_year: Some(2026),
            language: "de".to_string(),
        }
    }

    /// A point a given walking distance east of `origin`.
    fn east_of(origin: GeoPoint, meters: f64) -> GeoPoint {
        let moved = origin.to_point().haversine_destination(90.0, meters);
        GeoPoint::new(moved.y(), moved.x()).unwrap()
    }

    #[test]
    fn listing_near_stop_is_reachable() {
        let origin = point(46.948, 7.447);
        let arrivals = vec![stop("s1", 10.0, origin)];
        let listings = vec![listing_at("a", east_of(origin, 300.0))];

        let result = match_reachable(&arrivals, &listings, 30.0, &ReachabilityConfig::default());

        assert_eq!(result.len(), 1);
        // 10 min transit + 300 m / 80 m per min, rounded
        assert_eq!(result[0].travel_time_minutes, 14);
        assert_eq!(result[0].nearest_stop_name, "S1");
    }

    #[test]
    fn listing_beyond_walking_range_is_not() {
        let origin = point(46.948, 7.447);
        let arrivals = vec![stop("s1", 10.0, origin)];
        let listings = vec![listing_at("a", east_of(origin, 500.0))];

        let result = match_reachable(&arrivals, &listings, 30.0, &ReachabilityConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn no_arrivals_means_nothing_reachable() {
        let listings = vec![listing_at("a", point(46.948, 7.447))];

        let result = match_reachable(&[], &listings, 30.0, &ReachabilityConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn total_exactly_at_budget_is_included() {
        let origin = point(46.948, 7.447);
        // Listing at the stop itself: no walk, total equals the arrival
        let arrivals = vec![stop("s1", 15.0, origin)];
        let listings = vec![listing_at("a", origin)];

        let result = match_reachable(&arrivals, &listings, 15.0, &ReachabilityConfig::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].travel_time_minutes, 15);
    }

    #[test]
    fn budget_excludes_a_later_arrival() {
        let origin = point(46.948, 7.447);
        let arrivals = vec![stop("s1", 16.0, origin)];
        let listings = vec![listing_at("a", origin)];

        let result = match_reachable(&arrivals, &listings, 15.0, &ReachabilityConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn picks_the_stop_with_smallest_total() {
        let near = point(46.948, 7.447);
        let far = east_of(near, 350.0);
        // The nearer stop arrives later; walking still makes it worse
        let arrivals = vec![stop("late", 20.0, near), stop("early", 12.0, far)];
        let listings = vec![listing_at("a", near)];

        let result = match_reachable(&arrivals, &listings, 30.0, &ReachabilityConfig::default());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].nearest_stop_name, "EARLY");
    }

    #[test]
    fn tie_keeps_the_earlier_arrival_entry() {
        let origin = point(46.948, 7.447);
        let arrivals = vec![stop("first", 10.0, origin), stop("second", 10.0, origin)];
        let listings = vec![listing_at("a", origin)];

        let result = match_reachable(&arrivals, &listings, 30.0, &ReachabilityConfig::default());
        assert_eq!(result[0].nearest_stop_name, "FIRST");
    }

    #[test]
    fn sorted_by_travel_time() {
        let a = point(46.948, 7.447);
        let b = point(46.967, 7.465);
        let arrivals = vec![stop("s1", 20.0, a), stop("s2", 5.0, b)];
        let listings = vec![listing_at("slow", a), listing_at("fast", b)];

        let result = match_reachable(&arrivals, &listings, 30.0, &ReachabilityConfig::default());

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].listing.id, "fast");
        assert_eq!(result[1].listing.id, "slow");
    }

    #[test]
    fn duplicate_ids_keep_the_first_occurrence() {
        let origin = point(46.948, 7.447);
        let arrivals = vec![stop("s1", 10.0, origin)];
        let mut duplicate = listing_at("a", origin);
        duplicate.company = "Duplikat GmbH".to_string();
        let listings = vec![listing_at("a", origin), duplicate];

        let result = match_reachable(&arrivals, &listings, 30.0, &ReachabilityConfig::default());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].listing.company, "Muster AG");
    }

    #[test]
    fn out_of_range_coordinates_are_skipped() {
        let origin = point(46.948, 7.447);
        let arrivals = vec![stop("s1", 10.0, origin)];
        let mut broken = listing_at("bad", origin);
        broken.lat = 95.0;
        let listings = vec![broken, listing_at("good", origin)];

        let result = match_reachable(&arrivals, &listings, 30.0, &ReachabilityConfig::default());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].listing.id, "good");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::StopId;
    use proptest::prelude::*;

    fn arb_stop() -> impl Strategy<Value = StopArrival> {
        (46.0f64..47.5, 6.0f64..9.0, 0.0f64..60.0, 0usize..1000).prop_map(
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

    fn arb_listing() -> impl Strategy<Value = Apprenticeship> {
        (46.0f64..47.5, 6.0f64..9.0, 0usize..50).prop_map(|(lat, lng, n)| Apprenticeship {
            id: format!("listing-{n}"),
            company: format!("Firma {n}"),
            job: "Kauffrau/Kaufmann EFZ".to_string(),
            canton: "ZH".to_string(),
            city: "Zürich".to_string(),
            lat,
            lng,
            address: "Bahnhofstrasse 1".to_string(),
            postal: "8001".to_string(),
            positions: 1,
            contact_email: "jobs@example.ch".to_string(),
            contact_phone: "+41 44 000 00 00".to_string(),
            start_year: None,
            language: "de".to_string(),
        })
    }

    proptest! {
        #[test]
        fn no_duplicate_ids(
            arrivals in prop::collection::vec(arb_stop(), 0..20),
            listings in prop::collection::vec(arb_listing(), 0..30),
            budget in 5u32..120,
        ) {
            let result = match_reachable(
                &arrivals,
                &listings,
                f64::from(budget),
                &ReachabilityConfig::default(),
            );
            let mut ids: Vec<&str> = result.iter().map(|r| r.listing.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), result.len());
        }

        #[test]
        fn sorted_and_within_budget(
            arrivals in prop::collection::vec(arb_stop(), 0..20),
            listings in prop::collection::vec(arb_listing(), 0..30),
            budget in 5u32..120,
        ) {
            let result = match_reachable(
                &arrivals,
                &listings,
                f64::from(budget),
                &ReachabilityConfig::default(),
            );
            for pair in result.windows(2) {
                prop_assert!(pair[0].travel_time_minutes <= pair[1].travel_time_minutes);
            }
            for r in &result {
                // Rounding can push a boundary total up by half a minute
                prop_assert!(f64::from(r.travel_time_minutes) <= f64::from(budget) + 0.5);
            }
        }

        #[test]
        fn larger_budget_never_loses_listings(
            arrivals in prop::collection::vec(arb_stop(), 0..20),
            listings in prop::collection::vec(arb_listing(), 0..30),
            budget in 5u32..60,
        ) {
            let config = ReachabilityConfig::default();
            let small = match_reachable(&arrivals, &listings, f64::from(budget), &config);
            let large = match_reachable(&arrivals, &listings, f64::from(budget * 2), &config);

            for r in &small {
                let grown = large.iter().find(|g| g.listing.id == r.listing.id);
                prop_assert!(grown.is_some());
                prop_assert_eq!(grown.map(|g| g.travel_time_minutes), Some(r.travel_time_minutes));
            }
        }
    }
}
