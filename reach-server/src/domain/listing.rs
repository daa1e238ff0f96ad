//! Apprenticeship listing types.

use serde::{Deserialize, Serialize};

/// An apprenticeship opening with a fixed geographic location.
///
/// Supplied by the listings source and immutable during a computation.
/// Coordinates are carried raw as they appear in the source data; code
/// that needs a validated point builds a `GeoPoint` from them and skips
/// records that fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apprenticeship {
    pub id: String,
    pub company: String,
    pub job: String,
    pub canton: String,
    pub city: String,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub postal: String,
    pub positions: u32,
    pub contact_email: String,
    pub contact_phone: String,
    pub start_year: Option<i32>,
    pub language: String,
}

/// A listing matched against an arrival table, with the derived travel
/// facts attached.
///
/// Exists only as computation output; one instance per reachable listing,
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachableListing {
    /// The matched listing
    pub listing: Apprenticeship,

    /// Total door-to-door travel time in minutes, rounded
    pub travel_time_minutes: u32,

    /// Stop from which the final walking leg starts
    pub nearest_stop_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_listing() {
        let json = r#"{
            "id": "a-102",
            "company": "Muster AG",
            "job": "Informatiker/in EFZ",
            "canton": "BE",
            "city": "Bern",
            "lat": 46.948,
            "lng": 7.447,
            "address": "Bahnhofplatz 1",
            "postal": "3011",
            "positions": 2,
            "contact_email": "lehre@muster.ch",
            "contact_phone": "+41 31 000 00 00",
            "start_year": 2027,
            "language": "de"
        }"#;

        let listing: Apprenticeship = serde_json::from_str(json).unwrap();
        assert_eq!(listing.id, "a-102");
        assert_eq!(listing.positions, 2);
        assert_eq!(listing.start_year, Some(2027));
    }

    #[test]
    fn deserialize_listing_null_start_year() {
        let json = r#"{
            "id": "a-103",
            "company": "Beispiel GmbH",
            "job": "Kauffrau/Kaufmann EFZ",
            "canton": "ZH",
            "city": "Zürich",
            "lat": 47.378,
            "lng": 8.540,
            "address": "Löwenstrasse 2",
            "postal": "8001",
            "positions": 1,
            "contact_email": "hr@beispiel.ch",
            "contact_phone": "+41 44 000 00 00",
            "start_year": null,
            "language": "de"
        }"#;

        let listing: Apprenticeship = serde_json::from_str(json).unwrap();
        assert_eq!(listing.start_year, None);
    }
}
