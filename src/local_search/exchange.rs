//! Inter-route exchange operator (2-opt*).
//!
//! # Algorithm
//!
//! The cross-exchange (2-opt*) operator swaps tail segments between two
//! routes. Given routes R1 = [a₁, ..., aᵢ, aᵢ₊₁, ..., aₙ] and
//! R2 = [b₁, ..., bⱼ, bⱼ₊₁, ..., bₘ], produce:
//!
//! R1' = [a₁, ..., aᵢ, bⱼ₊₁, ..., bₘ]
//! R2' = [b₁, ..., bⱼ, aᵢ₊₁, ..., aₙ]
//!
//! Candidate pairs are re-priced in full (durations are asymmetric) and
//! accepted best-first while they reduce total duration and keep both
//! resulting loads within every capacity dimension.
//!
//! # Complexity
//!
//! O(n² · m²) per pass, where n = stops per route, m = number of routes.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational
//! Research Society* 46(12), 1433-1446.

use crate::evaluation::CostModel;
use crate::models::{Load, Stop, VehicleProfile};

/// A tail swap between two routes at the given cut points.
#[derive(Debug, Clone)]
struct ExchangeMove {
    route_a: usize,
    cut_a: usize,
    route_b: usize,
    cut_b: usize,
    delta: f64,
}

/// Applies inter-route tail-swap improvement to an assignment.
///
/// Returns the improved per-vehicle stop-index sequences.
pub fn exchange_improve(
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

    while let Some(mv) = find_best_exchange(&current, stops, fleet, cost, keep_nonempty) {
        let tail_a = current[mv.route_a].split_off(mv.cut_a);
        let tail_b = current[mv.route_b].split_off(mv.cut_b);
        current[mv.route_a].extend(tail_b);
        current[mv.route_b].extend(tail_a);
    }

    current
}

/// Finds the best improving tail swap, if any.
fn find_best_exchange(
    routes: &[Vec<usize>],
    stops: &[Stop],
    fleet: &[VehicleProfile],
    cost: &CostModel,
    keep_nonempty: bool,
) -> Option<ExchangeMove> {
    let mut best: Option<ExchangeMove> = None;

    for route_a in 0..routes.len() {
        for route_b in route_a + 1..routes.len() {
            let seq_a = &routes[route_a];
            let seq_b = &routes[route_b];
            let old = cost.route_duration(seq_a) + cost.route_duration(seq_b);

            for cut_a in 0..=seq_a.len() {
                for cut_b in 0..=seq_b.len() {
                    if cut_a == seq_a.len() && cut_b == seq_b.len() {
                        continue;
                    }

                    let new_a: Vec<usize> = seq_a[..cut_a]
                        .iter()
                        .chain(&seq_b[cut_b..])
                        .copied()
                        .collect();
                    let new_b: Vec<usize> = seq_b[..cut_b]
                        .iter()
                        .chain(&seq_a[cut_a..])
                        .copied()
                        .collect();

                    if keep_nonempty
                        && !seq_a.is_empty()
                        && !seq_b.is_empty()
                        && (new_a.is_empty() || new_b.is_empty())
                    {
                        continue;
                    }
                    if !Load::from_sequence(&new_a, stops).fits(&fleet[route_a])
                        || !Load::from_sequence(&new_b, stops).fits(&fleet[route_b])
                    {
                        continue;
                    }

                    let delta =
                        cost.route_duration(&new_a) + cost.route_duration(&new_b) - old;
                    if delta < -1e-9 {
                        let is_better = best.as_ref().is_none_or(|b| delta < b.delta);
                        if is_better {
                            best = Some(ExchangeMove {
                                route_a,
                                cut_a,
                                route_b,
                                cut_b,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::TravelMatrix;
    use crate::maps::Leg;

    /// 2×n grid: stops 1..=n on the north row, n+1..=2n on the south row.
    fn grid_matrix(n: usize) -> (TravelMatrix, Vec<(f64, f64)>) {
        let mut points: Vec<(f64, f64)> = vec![(0.0, 0.0)];
        for i in 0..n {
            points.push((1.0 + i as f64, 1.0));
        }
        for i in 0..n {
            points.push((1.0 + i as f64, -1.0));
        }
        let size = points.len();
        let mut entries = Vec::new();
        for &(x1, y1) in &points {
            for &(x2, y2) in &points {
                let d = ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt();
                entries.push(Some(Leg {
                    distance_m: d * 1000.0,
                    duration_s: d * 60.0,
                }));
            }
        }
        (
            TravelMatrix::from_entries(size, entries).expect("valid"),
            points,
        )
    }

    fn standard_stops(count: usize) -> Vec<Stop> {
        (0..count)
            .map(|i| Stop::new(format!("addr-{i}"), vec![format!("r{i}")], false))
            .collect()
    }

    fn total_duration(routes: &[Vec<usize>], cost: &CostModel) -> f64 {
        routes.iter().map(|r| cost.route_duration(r)).sum()
    }

    #[test]
    fn test_untangles_crossed_tails() {
        let (tm, _) = grid_matrix(2);
        let cost = CostModel::new(&tm);
        let stops = standard_stops(4);
        let fleet = vec![
            VehicleProfile::standard(0, 10),
            VehicleProfile::standard(1, 10),
        ];
        // Route 0 jumps north→south, route 1 south→north: tails crossed.
        let routes = vec![vec![1, 4], vec![3, 2]];
        let improved = exchange_improve(&routes, &stops, &fleet, &cost, false);
        assert!(total_duration(&improved, &cost) < total_duration(&routes, &cost));
        let placed: usize = improved.iter().map(Vec::len).sum();
        assert_eq!(placed, 4);
    }

    #[test]
    fn test_respects_capacity() {
        let (tm, _) = grid_matrix(2);
        let cost = CostModel::new(&tm);
        let mut stops = standard_stops(4);
        // Make stop 4 heavy so it cannot join vehicle 0's route.
        stops[3] = Stop::new(
            "addr-3",
            (0..9).map(|r| format!("big-{r}")).collect(),
            false,
        );
        let fleet = vec![
            VehicleProfile::standard(0, 2),
            VehicleProfile::standard(1, 10),
        ];
        let routes = vec![vec![1, 2], vec![3, 4]];
        let improved = exchange_improve(&routes, &stops, &fleet, &cost, false);
        for (vehicle, route) in improved.iter().enumerate() {
            assert!(Load::from_sequence(route, &stops).fits(&fleet[vehicle]));
        }
    }

    #[test]
    fn test_keep_nonempty_blocks_full_tail_takeover() {
        let (tm, _) = grid_matrix(1);
        let cost = CostModel::new(&tm);
        let stops = standard_stops(2);
        let fleet = vec![
            VehicleProfile::standard(0, 10),
            VehicleProfile::standard(1, 10),
        ];
        let routes = vec![vec![1], vec![2]];
        let improved = exchange_improve(&routes, &stops, &fleet, &cost, true);
        assert!(improved.iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn test_never_worsens() {
        let (tm, _) = grid_matrix(3);
        let cost = CostModel::new(&tm);
        let stops = standard_stops(6);
        let fleet = vec![
            VehicleProfile::standard(0, 10),
            VehicleProfile::standard(1, 10),
        ];
        let routes = vec![vec![1, 5, 3], vec![4, 2, 6]];
        let improved = exchange_improve(&routes, &stops, &fleet, &cost, false);
        assert!(total_duration(&improved, &cost) <= total_duration(&routes, &cost) + 1e-9);
    }
}
