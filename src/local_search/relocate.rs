//! Inter-route stop relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each stop from its current route to the best insertion
//! position in another route. Accepts the best duration-reducing move per
//! pass, subject to every capacity dimension of the receiving vehicle, and
//! repeats until no improving move remains.
//!
//! With `keep_nonempty`, a move never empties a route — the solver sets
//! this whenever stops outnumber vehicles, so the fleet-utilization policy
//! survives local search.
//!
//! # Complexity
//!
//! O(n² · m) per pass for n stops and m routes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::constructive::insertion_cost;
use crate::evaluation::CostModel;
use crate::models::{Load, Stop, VehicleProfile};

/// A relocate move: one stop from one route to another.
#[derive(Debug, Clone)]
struct RelocateMove {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: f64,
}

/// Applies inter-route relocate improvement to an assignment.
///
/// Returns the improved per-vehicle stop-index sequences.
pub fn relocate_improve(
    routes: &[Vec<usize>],
    stops: &[Stop],
    fleet: &[VehicleProfile],
    cost: &CostModel,
    keep_nonempty: bool,
) -> Vec<Vec<usize>> {
    let mut current: Vec<Vec<usize>> = routes.to_vec();
    if current.len() < 2 {
        return current;
    }

    while let Some(mv) = find_best_relocate(&current, stops, fleet, cost, keep_nonempty) {
        let stop_idx = current[mv.from_route].remove(mv.from_pos);
        current[mv.to_route].insert(mv.to_pos, stop_idx);
    }

    current
}

/// Finds the best improving relocate move, if any.
fn find_best_relocate(
    routes: &[Vec<usize>],
    stops: &[Stop],
    fleet: &[VehicleProfile],
    cost: &CostModel,
    keep_nonempty: bool,
) -> Option<RelocateMove> {
    let mut best: Option<RelocateMove> = None;

    for from_route in 0..routes.len() {
        if keep_nonempty && routes[from_route].len() <= 1 {
            continue;
        }

        for from_pos in 0..routes[from_route].len() {
            let stop_idx = routes[from_route][from_pos];
            let removal_delta = removal_cost(&routes[from_route], from_pos, cost);

            for (to_route, to_seq) in routes.iter().enumerate() {
                if to_route == from_route {
                    continue;
                }

                let mut load = Load::from_sequence(to_seq, stops);
                load.add_stop(&stops[stop_idx - 1]);
                if !load.fits(&fleet[to_route]) {
                    continue;
                }

                for to_pos in 0..=to_seq.len() {
                    let delta = removal_delta + insertion_cost(to_seq, to_pos, stop_idx, cost);
                    if delta < -1e-9 {
                        let is_better = best.as_ref().is_none_or(|b| delta < b.delta);
                        if is_better {
                            best = Some(RelocateMove {
                                from_route,
                                from_pos,
                                to_route,
                                to_pos,
                                delta,
                            });
                        }
                    }
                }
            }
        }
    }

    best
}

/// Duration change of removing the stop at `pos` from a sequence.
fn removal_cost(seq: &[usize], pos: usize, cost: &CostModel) -> f64 {
    let prev = if pos == 0 { 0 } else { seq[pos - 1] };
    let next = if pos == seq.len() - 1 { 0 } else { seq[pos + 1] };
    let stop_idx = seq[pos];

    // Old: prev → stop → next
    // New: prev → next
    cost.duration(prev, next) - cost.duration(prev, stop_idx) - cost.duration(stop_idx, next)
}
