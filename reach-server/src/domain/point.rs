//! Geographic coordinate types.

use std::fmt;

use geo::{HaversineDistance, Point};

/// Error returned when constructing an invalid coordinate pair.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A validated WGS84 coordinate pair.
///
/// Latitude is confined to [-90, 90] and longitude to [-180, 180];
/// non-finite values are rejected. Any `GeoPoint` value is valid by
/// construction.
///
/// # Examples
///
/// ```
/// use reach_server::domain::GeoPoint;
///
/// let bern = GeoPoint::new(46.948, 7.447).unwrap();
/// assert_eq!(bern.lat(), 46.948);
///
/// // Out-of-range latitude is rejected
/// assert!(GeoPoint::new(91.0, 7.447).is_err());
///
/// // Out-of-range longitude is rejected
/// assert!(GeoPoint::new(46.948, 181.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(GeoPoint { lat, lng })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Convert to a geometry point (x = longitude, y = latitude).
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }

    /// Great-circle distance to another point, in metres.
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        self.to_point().haversine_distance(&other.to_point())
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoPoint({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn valid_point() -> impl Strategy<Value = GeoPoint> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(lat, lng)| GeoPoint::new(lat, lng).unwrap())
    }

    proptest! {
        /// Any in-range pair constructs successfully
        #[test]
        fn in_range_always_constructs(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            prop_assert!(GeoPoint::new(lat, lng).is_ok());
        }

        /// Distance is symmetric
        #[test]
        fn distance_symmetric(a in valid_point(), b in valid_point()) {
            let ab = a.distance_meters(&b);
            let ba = b.distance_meters(&a);
            prop_assert!((ab - ba).abs() < 1e-6);
        }

        /// Distance is never negative
        #[test]
        fn distance_non_negative(a in valid_point(), b in valid_point()) {
            prop_assert!(a.distance_meters(&b) >= 0.0);
        }
    }
}
