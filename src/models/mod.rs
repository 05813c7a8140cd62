//! Domain model types for pickup routing.
//!
//! Provides the core abstractions: rider records grouped into stops,
//! vehicle capacity profiles with independent accessibility and standard
//! seat limits, routes as ordered stop sequences with replayed metrics,
//! and the plan that owns one optimization session's routes.

mod format;
mod plan;
mod route;
mod stop;
mod vehicle;

pub use format::{format_distance, format_duration};
pub use plan::Plan;
pub use route::{Route, RouteMetrics};
pub use stop::{accessibility_flag, RiderRecord, Stop};
pub use vehicle::{Load, VehicleProfile};
