//! Address resolution with caching, bounded retry, and batch reporting.

mod resolver;

pub use resolver::{AddressResolver, GeocodeFailure};
