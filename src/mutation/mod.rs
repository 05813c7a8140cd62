//! Constraint-checked plan edits.
//!
//! - [`PlanEdit`] — edit descriptors (move a rider, reorder stops,
//!   reorder riders)
//! - [`apply`] — applies one atomic edit, re-validating every affected
//!   constraint; on violation the plan is left untouched
//! - [`ConstraintViolation`] — names exactly which rule an edit broke
//!
//! Edits apply one at a time against a single in-memory plan. The plan is
//! a single-writer value: a concurrent host must serialize edits (a mutex
//! or a single-writer queue) rather than share one plan between writers.

mod edit;
mod mutator;

pub use edit::{InsertPosition, PlanEdit, StopRef};
pub use mutator::{apply, ConstraintViolation};
