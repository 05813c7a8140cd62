//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of edges in a route, compute the duration change from
//! reversing the segment between them:
//!
//! ```text
//! delta = d(prev_i, r[j]) + d(r[i], next_j) - d(prev_i, r[i]) - d(r[j], next_j)
//! ```
//!
//! If delta < 0, reverse the segment `[i..=j]` and accept the improvement.
//! Repeat until no further improvements are found (first-improvement
//! strategy). Durations are asymmetric in general, so the delta is exact
//! only for symmetric matrices; a full re-pricing guards the final accept.
//!
//! # Complexity
//!
//! O(n²) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::evaluation::CostModel;

/// Applies 2-opt improvement to a single stop-index sequence.
///
/// The route implicitly starts and ends at the depot (index 0). Returns
/// the improved sequence and its total duration.
pub fn two_opt_improve(seq: &[usize], cost: &CostModel) -> (Vec<usize>, f64) {
    if seq.len() < 2 {
        return (seq.to_vec(), cost.route_duration(seq));
    }

    let mut current = seq.to_vec();
    let mut current_duration = cost.route_duration(&current);
    let mut improved = true;

    while improved {
        improved = false;
        let n = current.len();

        for i in 0..n - 1 {
            for j in i + 1..n {
                let delta = two_opt_delta(&current, cost, i, j);
                if delta < -1e-9 {
                    let mut candidate = current.clone();
                    candidate[i..=j].reverse();
                    // Asymmetric durations: the edge delta is a lower
                    // bound, so confirm with a full re-pricing.
                    let candidate_duration = cost.route_duration(&candidate);
                    if candidate_duration < current_duration - 1e-9 {
                        current = candidate;
                        current_duration = candidate_duration;
                        improved = true;
                    }
                }
            }
        }
    }

    (current, current_duration)
}

/// Duration change of the boundary edges when reversing `[i..=j]`.
fn two_opt_delta(seq: &[usize], cost: &CostModel, i: usize, j: usize) -> f64 {
    let n = seq.len();
    let prev_i = if i == 0 { 0 } else { seq[i - 1] };
    let next_j = if j == n - 1 { 0 } else { seq[j + 1] };

    let old_cost = cost.duration(prev_i, seq[i]) + cost.duration(seq[j], next_j);
    let new_cost = cost.duration(prev_i, seq[j]) + cost.duration(seq[i], next_j);

    new_cost - old_cost
}
