//! Routing engine backed by precomputed JSON tables.
//!
//! Serves prebuilt arrival data instead of running real timetable
//! propagation. Useful for development and testing without the full
//! routing engine; the blob format doubles as a readable fixture
//! format.

use std::collections::HashMap;

use chrono::NaiveTime;
use serde::Deserialize;

use crate::domain::{GeoPoint, Stop, StopArrival, StopId};

use super::data::EngineData;
use super::error::EngineError;
use super::worker::TransitEngine;

#[derive(Debug, Deserialize)]
struct StopRecord {
    id: String,
    name: String,
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct ArrivalRecord {
    id: String,
    minutes: f64,
}

/// Engine that looks up arrivals in a prebuilt table.
///
/// The stops blob is a JSON array of stop records; the timetable blob
/// maps origin stop ids to arrival records. The table is static, so
/// the departure time does not vary the result.
pub struct PrecomputedEngine {
    stops: Vec<Stop>,
    by_id: HashMap<String, usize>,
    table: HashMap<String, Vec<ArrivalRecord>>,
}

impl PrecomputedEngine {
    /// Parse both blobs. Stops with out-of-range coordinates are
    /// silently dropped.
    pub fn from_data(data: &EngineData) -> Result<Self, EngineError> {
        let records: Vec<StopRecord> =
            serde_json::from_slice(&data.stops).map_err(|e| EngineError::Decode {
                message: format!("stops: {e}"),
            })?;
        let table: HashMap<String, Vec<ArrivalRecord>> =
            serde_json::from_slice(&data.timetable).map_err(|e| EngineError::Decode {
                message: format!("timetable: {e}"),
            })?;

        let stops: Vec<Stop> = records
            .into_iter()
            .filter_map(|r| {
                let position = GeoPoint::new(r.lat, r.lng).ok()?;
                Some(Stop::new(StopId::new(r.id), r.name, position))
            })
            .collect();

        let by_id = stops
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str().to_string(), i))
            .collect();

        Ok(Self {
            stops,
            by_id,
            table,
        })
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}

impl TransitEngine for PrecomputedEngine {
    fn nearest_stop(&self, point: GeoPoint, radius_km: f64) -> Result<Option<Stop>, EngineError> {
        let mut best: Option<(f64, &Stop)> = None;
        for stop in &self.stops {
            let distance = stop.position.distance_meters(&point);
            // Strict comparison keeps the first stop on equal distance
            if best.as_ref().is_none_or(|(d, _)| distance < *d) {
                best = Some((distance, stop));
            }
        }

        Ok(best
            .filter(|(distance, _)| *distance <= radius_km * 1000.0)
            .map(|(_, stop)| stop.clone()))
    }

    fn earliest_arrivals(
        &self,
        origin: &StopId,
        _departure: NaiveTime,
        max_minutes: u32,
    ) -> Result<Vec<StopArrival>, EngineError> {
        let rows = self
            .table
            .get(origin.as_str())
            .ok_or_else(|| EngineError::UnknownStop(origin.to_string()))?;

        // Arrival rows pointing at stops missing from the registry are
        // dropped, mirroring the registry's own coordinate filtering.
        Ok(rows
            .iter()
            .filter(|r| r.minutes >= 0.0 && r.minutes <= f64::from(max_minutes))
            .filter_map(|r| {
                let stop = &self.stops[*self.by_id.get(&r.id)?];
                Some(StopArrival::new(
                    stop.id.clone(),
                    stop.name.clone(),
                    stop.position,
                    r.minutes,
                ))
            })
            .collect())
    }
}
