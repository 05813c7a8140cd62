//! Cost model and route-metric replay.
//!
//! - [`CostModel`] — duration lookup with an explicit penalty for
//!   unreachable pairs, used by construction and local search
//! - [`RouteEvaluator`] — replays a stop sequence against the travel
//!   matrix to derive exact route metrics

mod cost;
mod evaluator;

pub use cost::{CostModel, UNREACHABLE_PENALTY_S};
pub use evaluator::RouteEvaluator;
