//! Oracle contract and geographic primitives.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geographic coordinates (WGS84 latitude/longitude in degrees).
///
/// # Examples
///
/// ```
/// use paratransit_routing::maps::Coordinates;
///
/// let a = Coordinates::new(40.56, -111.93);
/// let b = Coordinates::new(40.56, -111.93);
/// assert_eq!(a, b);
/// assert!(a.distance_m(&b) < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinates {
    /// Creates coordinates from latitude and longitude in degrees.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another point, in meters (haversine).
    pub fn distance_m(&self, other: &Coordinates) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_000.0;
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlng = (other.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// One directed leg between two points: travel distance and travel duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Travel distance in meters.
    pub distance_m: f64,
    /// Travel duration in seconds.
    pub duration_s: f64,
}

/// One travel-matrix call's result: `block[i][j]` is the leg from
/// `origins[i]` to `destinations[j]`, `None` when the oracle reports the
/// pair unreachable.
pub type MatrixBlock = Vec<Vec<Option<Leg>>>;

/// A geocoding failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// The oracle returned zero results. Definitive; never retried.
    #[error("no geocoding result for `{address}`")]
    NotFound {
        /// The address that produced no results.
        address: String,
    },
    /// The oracle answered with a non-success status.
    #[error("geocoding service returned status `{status}`: {message}")]
    Service {
        /// Status string reported by the oracle.
        status: String,
        /// Accompanying message, if any.
        message: String,
    },
    /// Network-class failure (connect, timeout, transport). Retryable.
    #[error("geocoding request failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("malformed geocoding response: {message}")]
    Malformed {
        /// Description of the decode failure.
        message: String,
    },
}

impl GeocodeError {
    /// Returns `true` if an immediate retry could plausibly succeed.
    ///
    /// A definitive "not found" or a non-success service status is not
    /// transient; transport failures are.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// A travel-matrix failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// The oracle answered with a non-success status.
    #[error("travel-matrix service returned status `{status}`: {message}")]
    Service {
        /// Status string reported by the oracle.
        status: String,
        /// Accompanying message, if any.
        message: String,
    },
    /// Network-class failure (connect, timeout, transport). Retryable.
    #[error("travel-matrix request failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("malformed travel-matrix response: {message}")]
    Malformed {
        /// Description of the decode failure.
        message: String,
    },
    /// The oracle returned a block whose shape does not match the request.
    #[error("travel-matrix block is {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    BlockShape {
        /// Rows received.
        rows: usize,
        /// Columns received (first short/long row).
        cols: usize,
        /// Rows requested.
        expected_rows: usize,
        /// Columns requested.
        expected_cols: usize,
    },
}

impl MatrixError {
    /// Returns `true` if an immediate retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// External mapping oracle: free-text geocoding plus pairwise travel costs.
///
/// Implementations are expected to be cheap to call repeatedly but bounded
/// by a maximum of `origins.len() * destinations.len()` elements per
/// travel-matrix call; callers chunk larger queries (see
/// [`TravelMatrixBuilder`](crate::distance::TravelMatrixBuilder)).
pub trait MapsService {
    /// Resolves a free-text address to coordinates.
    fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError>;

    /// Computes travel legs from every origin to every destination.
    ///
    /// The returned block must have `origins.len()` rows of
    /// `destinations.len()` elements each; unreachable pairs are `None`.
    fn travel_matrix(
        &self,
        origins: &[Coordinates],
        destinations: &[Coordinates],
    ) -> Result<MatrixBlock, MatrixError>;
}
