//! Random perturbation for escaping local optima.
//!
//! # Algorithm
//!
//! Applies a handful of random feasible relocations: pick a random
//! assigned stop, pick a random route and position that accept it, move
//! it. No cost is consulted — the point is diversification; the caller
//! re-runs the improvement operators afterwards and keeps the result only
//! if the full objective got better.

use rand::Rng;

use crate::models::{Load, Stop, VehicleProfile};

/// Applies `moves` random feasible relocations to the assignment.
///
/// Respects every capacity dimension; with `keep_nonempty`, never empties
/// a route. Moves that find no feasible target are skipped.
pub fn perturb<R: Rng>(
    routes: &mut [Vec<usize>],
    stops: &[Stop],
    fleet: &[VehicleProfile],
    rng: &mut R,
    moves: usize,
    keep_nonempty: bool,
) {
    if routes.len() < 2 {
        return;
    }

    for _ in 0..moves {
        let assigned: usize = routes.iter().map(Vec::len).sum();
        if assigned == 0 {
            return;
        }

        // Pick the k-th assigned stop across all routes.
        let target = rng.random_range(0..assigned as u64) as usize;
        let mut count = 0;
        let mut source: Option<(usize, usize)> = None;
        for (route, seq) in routes.iter().enumerate() {
            if count + seq.len() > target {
                source = Some((route, target - count));
                break;
            }
            count += seq.len();
        }
        let Some((from_route, from_pos)) = source else {
            return;
        };
        if keep_nonempty && routes[from_route].len() <= 1 {
            continue;
        }

        let stop_idx = routes[from_route][from_pos];
        let candidates: Vec<usize> = (0..routes.len())
            .filter(|&to_route| {
                if to_route == from_route {
                    return false;
                }
                let mut load = Load::from_sequence(&routes[to_route], stops);
                load.add_stop(&stops[stop_idx - 1]);
                load.fits(&fleet[to_route])
            })
            .collect();
        if candidates.is_empty() {
            continue;
        }

        let to_route = candidates[rng.random_range(0..candidates.len() as u64) as usize];
        let to_pos = rng.random_range(0..(routes[to_route].len() + 1) as u64) as usize;
        routes[from_route].remove(from_pos);
        routes[to_route].insert(to_pos, stop_idx);
    }
}
