//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Apprenticeship, ReachableListing};
use crate::geocode::AddressMatch;
use crate::reachability::ReachabilityResult;

/// Request to compute reachability.
#[derive(Debug, Deserialize)]
pub struct ComputeRequest {
    /// Where the search starts; omitted while the user has not picked
    /// a location yet
    pub start: Option<StartPoint>,

    /// Travel-time budget in minutes
    pub max_minutes: u32,
}

/// A raw start coordinate, validated in the handler.
#[derive(Debug, Deserialize)]
pub struct StartPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A listing in reachability results.
#[derive(Debug, Serialize)]
pub struct ReachableListingResult {
    /// The listing itself, inlined
    #[serde(flatten)]
    pub listing: Apprenticeship,

    /// Door-to-door travel time in minutes
    pub travel_time: u32,

    /// Name of the stop the walk starts from
    pub nearest_stop_name: String,
}

impl ReachableListingResult {
    pub fn from_domain(reachable: &ReachableListing) -> Self {
        Self {
            listing: reachable.listing.clone(),
            travel_time: reachable.travel_time_minutes,
            nearest_stop_name: reachable.nearest_stop_name.clone(),
        }
    }
}

/// A polygon vertex.
#[derive(Debug, Serialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Response for reachability computation.
#[derive(Debug, Serialize)]
pub struct ComputeResponse {
    /// Reachable listings, best first
    pub reachable: Vec<ReachableListingResult>,

    /// Isochrone outline as a closed ring, if one was built
    pub isochrone: Option<Vec<LatLng>>,
}

impl ComputeResponse {
    pub fn from_result(result: &ReachabilityResult) -> Self {
        let isochrone = result.isochrone.as_ref().map(|polygon| {
            polygon
                .exterior()
                .points()
                .map(|p| LatLng {
                    lat: p.y(),
                    lng: p.x(),
                })
                .collect()
        });

        Self {
            reachable: result
                .reachable
                .iter()
                .map(ReachableListingResult::from_domain)
                .collect(),
            isochrone,
        }
    }
}

/// Query parameters for address search.
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    /// Search text
    pub q: String,
}

/// An address in geocoding results.
#[derive(Debug, Serialize)]
pub struct AddressResult {
    /// Display label
    pub label: String,

    pub lat: f64,
    pub lng: f64,
}

impl AddressResult {
    pub fn from_domain(address: &AddressMatch) -> Self {
        Self {
            label: address.label.clone(),
            lat: address.lat,
            lng: address.lng,
        }
    }
}

/// Response for address search.
#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    /// Matching addresses
    pub results: Vec<AddressResult>,
}

/// Response listing every known apprenticeship.
#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub listings: Vec<Apprenticeship>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
