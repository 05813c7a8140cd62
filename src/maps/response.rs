//! Response payload types for the mapping oracle's JSON API.
//!
//! The oracle follows the Google Maps web-service shape: every response
//! carries a top-level `status` string, with the payload present only on
//! `"OK"`. Travel-matrix elements carry their own per-pair status, so a
//! single response can mix reachable and unreachable pairs.

use serde::Deserialize;

use super::service::Leg;

/// Geocoding API response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Top-level status: `"OK"`, `"ZERO_RESULTS"`, `"OVER_QUERY_LIMIT"`, ...
    pub status: String,
    /// Candidate results, best first. Empty unless `status` is `"OK"`.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    /// Optional error detail on non-success statuses.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    /// Returns `true` if the response carries at least one result.
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }

    /// Returns `true` if the address definitively matched nothing.
    pub fn is_zero_results(&self) -> bool {
        self.status == "ZERO_RESULTS"
    }
}

/// One geocoding candidate.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    /// Geometry block holding the resolved location.
    pub geometry: Geometry,
}

/// Geometry block of a geocoding result.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// Resolved location.
    pub location: LatLng,
}

/// Raw latitude/longitude pair.
#[derive(Debug, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Travel-matrix API response.
#[derive(Debug, Deserialize)]
pub struct MatrixResponse {
    /// Top-level status.
    pub status: String,
    /// One row per origin, in request order.
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
    /// Optional error detail on non-success statuses.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl MatrixResponse {
    /// Returns `true` if the response carries a usable row set.
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// One origin's row of matrix elements.
#[derive(Debug, Deserialize)]
pub struct MatrixRow {
    /// One element per destination, in request order.
    pub elements: Vec<MatrixElement>,
}

/// One origin/destination element.
#[derive(Debug, Deserialize)]
pub struct MatrixElement {
    /// Per-pair status: `"OK"`, `"ZERO_RESULTS"`, `"NOT_FOUND"`, ...
    pub status: String,
    /// Distance payload, present when `status` is `"OK"`.
    #[serde(default)]
    pub distance: Option<ValueField>,
    /// Duration payload, present when `status` is `"OK"`.
    #[serde(default)]
    pub duration: Option<ValueField>,
}

impl MatrixElement {
    /// Converts this element to a [`Leg`], or `None` when the pair is
    /// unreachable or the payload is incomplete.
    pub fn leg(&self) -> Option<Leg> {
        if self.status != "OK" {
            return None;
        }
        let distance = self.distance.as_ref()?;
        let duration = self.duration.as_ref()?;
        Some(Leg {
            distance_m: distance.value,
            duration_s: duration.value,
        })
    }
}

/// A `{ "value": n }` payload (meters or seconds).
#[derive(Debug, Deserialize)]
pub struct ValueField {
    /// The numeric value.
    pub value: f64,
}
