//! Optimization result taxonomy.
//!
//! A failed optimization is never a crash: the caller always gets either
//! a structured [`SolveError`] (input or oracle problem — no usable cost
//! model) or an [`OptimizeOutcome::Infeasible`] report (valid input, no
//! solution), so surrounding layers can show distinct messaging.

use serde::Serialize;
use thiserror::Error;

use crate::geocode::GeocodeFailure;
use crate::maps::MatrixError;
use crate::models::Plan;

use super::feasibility::InfeasibleReason;

/// Input/oracle failure that aborts an optimization call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The travel-matrix oracle failed after retries; without a cost model
    /// nothing can be optimized.
    #[error("could not build travel matrices: {0}")]
    Matrix(#[from] MatrixError),
}

/// Valid input for which no feasible plan exists (or none was found in
/// budget).
#[derive(Debug, Clone, PartialEq)]
pub struct InfeasibleReport {
    /// Why the instance is infeasible.
    pub reason: InfeasibleReason,
    /// Stop addresses that failed geocoding before the search.
    pub unresolved: Vec<GeocodeFailure>,
}

/// Result of one optimization call.
#[derive(Debug, Clone)]
pub enum OptimizeOutcome {
    /// A complete plan satisfying every capacity and eligibility rule.
    Feasible(Plan),
    /// No plan exists; the report says why. Never carries placeholder
    /// routes.
    Infeasible(InfeasibleReport),
}

impl OptimizeOutcome {
    /// Returns `true` for a feasible outcome.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    /// The plan, if feasible.
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Self::Feasible(plan) => Some(plan),
            Self::Infeasible(_) => None,
        }
    }

    /// Mutable access to the plan, if feasible.
    pub fn plan_mut(&mut self) -> Option<&mut Plan> {
        match self {
            Self::Feasible(plan) => Some(plan),
            Self::Infeasible(_) => None,
        }
    }

    /// Consumes the outcome, yielding the plan if feasible.
    pub fn into_plan(self) -> Option<Plan> {
        match self {
            Self::Feasible(plan) => Some(plan),
            Self::Infeasible(_) => None,
        }
    }

    /// The infeasibility report, if any.
    pub fn infeasibility(&self) -> Option<&InfeasibleReport> {
        match self {
            Self::Feasible(_) => None,
            Self::Infeasible(report) => Some(report),
        }
    }

    /// Serializable summary for display layers.
    pub fn summary(&self) -> PlanSummary {
        match self {
            Self::Feasible(plan) => PlanSummary {
                feasible: true,
                routes: plan
                    .routes()
                    .iter()
                    .map(|route| RouteSummary {
                        vehicle_id: route.vehicle_id(),
                        stop_order: route
                            .stops()
                            .iter()
                            .map(|s| s.address().to_string())
                            .collect(),
                        total_distance_m: route.metrics().map(|m| m.total_distance_m),
                        total_duration_s: route.metrics().map(|m| m.total_duration_s),
                        total_load: route.load().total(),
                    })
                    .collect(),
                unassigned_or_unresolved: plan.unassigned_addresses(),
            },
            Self::Infeasible(report) => PlanSummary {
                feasible: false,
                routes: Vec::new(),
                unassigned_or_unresolved: report
                    .unresolved
                    .iter()
                    .map(|f| f.address.clone())
                    .collect(),
            },
        }
    }
}

/// One route's display summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    /// The vehicle serving this route.
    pub vehicle_id: usize,
    /// Stop addresses in pickup order.
    pub stop_order: Vec<String>,
    /// Total distance in meters, absent when a leg is unreachable.
    pub total_distance_m: Option<f64>,
    /// Total duration in seconds, absent when a leg is unreachable.
    pub total_duration_s: Option<f64>,
    /// Riders on board.
    pub total_load: u32,
}

/// One optimization call's display summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    /// Whether a complete plan was found.
    pub feasible: bool,
    /// Per-vehicle route summaries; empty when infeasible.
    pub routes: Vec<RouteSummary>,
    /// Addresses left out: geocoding failures and unroutable stops.
    pub unassigned_or_unresolved: Vec<String>,
}
