//! # paratransit-routing
//!
//! Pickup routing for capacity-limited, accessibility-aware fleets:
//! geocoding, travel-time matrices, multi-vehicle route optimization, and
//! constraint-checked plan editing.
//!
//! ## Modules
//!
//! - [`maps`] — Mapping-oracle contract, HTTP client, response types
//! - [`geocode`] — Address resolution with caching and bounded retry
//! - [`distance`] — Travel matrices and the chunked matrix builder
//! - [`models`] — Domain types (riders, stops, vehicles, routes, plans)
//! - [`evaluation`] — Cost model and route-metric replay
//! - [`constructive`] — Capacity-aware cheapest-insertion construction
//! - [`local_search`] — 2-opt, relocate, exchange, perturbation
//! - [`solver`] — End-to-end route optimization
//! - [`mutation`] — Atomic, constraint-checked plan edits

pub mod constructive;
pub mod distance;
pub mod evaluation;
pub mod geocode;
pub mod local_search;
pub mod maps;
pub mod models;
pub mod mutation;
pub mod solver;
