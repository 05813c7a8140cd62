//! Constructive heuristics for building initial assignments.
//!
//! - [`cheapest_insertion`] — Capacity-aware parallel cheapest insertion
//!   with vehicle seeding, O(n²·m)

mod cheapest_insertion;

pub use cheapest_insertion::{cheapest_insertion, insertion_cost};
