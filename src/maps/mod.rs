//! Mapping-oracle boundary: geocoding and pairwise travel costs.
//!
//! - [`MapsService`] — the oracle contract (geocode + travel matrix)
//! - [`GoogleMapsClient`] — blocking HTTP implementation
//! - [`Coordinates`], [`Leg`] — geographic primitives
//! - [`GeocodeError`], [`MatrixError`] — failure taxonomy at the boundary

mod http;
mod response;
mod service;

pub use http::{ClientBuildError, GoogleMapsClient, MapsClientConfig, DEFAULT_BASE_URL};
pub use response::{
    GeocodeResponse, GeocodeResult, Geometry, LatLng, MatrixElement, MatrixResponse, MatrixRow,
    ValueField,
};
pub use service::{Coordinates, GeocodeError, Leg, MapsService, MatrixBlock, MatrixError};
