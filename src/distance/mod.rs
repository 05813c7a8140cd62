//! Travel matrices and the chunked matrix builder.
//!
//! - [`TravelMatrix`] — dense pairwise distance/duration matrix with
//!   explicit unreachable entries
//! - [`TravelMatrixBuilder`] — builds a full matrix from a mapping oracle,
//!   chunking requests under the per-call element limit

mod builder;
mod matrix;

pub use builder::{TravelMatrixBuilder, MAX_ELEMENTS_PER_REQUEST};
pub use matrix::TravelMatrix;
