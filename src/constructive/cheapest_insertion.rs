//! Parallel cheapest-insertion construction.
//!
//! # Algorithm
//!
//! All vehicles are built simultaneously: each iteration inserts the
//! unassigned stop whose cheapest feasible (vehicle, position) has the
//! lowest marginal duration increase, until every stop is placed or no
//! feasible insertion remains. Feasibility covers every capacity dimension
//! of the target vehicle (accessibility seats, standard seats, total cap).
//!
//! When stops outnumber vehicles, each vehicle is first seeded with one
//! stop — seeds taken in order of decreasing depot round trip — so no
//! vehicle is left structurally empty while others absorb all demand.
//!
//! If cost-greedy insertion strands a stop (capacity fragmentation), a
//! second pass retries with stops taken in decreasing-demand order, which
//! packs large stops before the slack is gone.
//!
//! # Complexity
//!
//! O(n² · m) for n stops and m vehicles.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An Analysis of
//! Several Heuristics for the Traveling Salesman Problem", *SIAM Journal
//! on Computing* 6(3), 563-581.

use crate::evaluation::CostModel;
use crate::models::{Load, Stop, VehicleProfile};

/// Builds an initial assignment: one stop-index sequence per vehicle.
///
/// `stops[i]` corresponds to matrix index `i + 1`; index 0 is the depot.
/// `routable` lists the matrix indices to place. Returns `None` when some
/// routable stop cannot be placed on any vehicle.
pub fn cheapest_insertion(
    routable: &[usize],
    stops: &[Stop],
    fleet: &[VehicleProfile],
    cost: &CostModel,
) -> Option<Vec<Vec<usize>>> {
    if fleet.is_empty() {
        return if routable.is_empty() {
            Some(Vec::new())
        } else {
            None
        };
    }

    construct(routable, stops, fleet, cost, false)
        .or_else(|| construct(routable, stops, fleet, cost, true))
}

/// One construction pass. With `demand_first`, ties the insertion order to
/// decreasing stop demand instead of pure cost.
fn construct(
    routable: &[usize],
    stops: &[Stop],
    fleet: &[VehicleProfile],
    cost: &CostModel,
    demand_first: bool,
) -> Option<Vec<Vec<usize>>> {
    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); fleet.len()];
    let mut unassigned: Vec<usize> = routable.to_vec();

    if demand_first {
        unassigned.sort_by_key(|&idx| std::cmp::Reverse(stops[idx - 1].rider_count()));
    }

    seed_vehicles(&mut routes, &mut unassigned, stops, fleet, cost);

    while !unassigned.is_empty() {
        let insertion = if demand_first {
            // Keep the demand order: place the first stop at its own best
            // feasible slot.
            best_slot_for(unassigned[0], &routes, stops, fleet, cost)
                .map(|(vehicle, pos, delta)| (0, vehicle, pos, delta))
        } else {
            best_insertion(&unassigned, &routes, stops, fleet, cost)
        };

        let (list_pos, vehicle, pos, _) = insertion?;
        // Plain remove keeps the demand-first ordering intact.
        let stop_idx = unassigned.remove(list_pos);
        routes[vehicle].insert(pos, stop_idx);
    }

    Some(routes)
}

/// Seeds every vehicle with one stop when stops outnumber vehicles.
///
/// Seeds are taken in decreasing depot-round-trip order so the spread
/// starts from the stops that anchor routes the furthest out.
fn seed_vehicles(
    routes: &mut [Vec<usize>],
    unassigned: &mut Vec<usize>,
    stops: &[Stop],
    fleet: &[VehicleProfile],
    cost: &CostModel,
) {
    if unassigned.len() < fleet.len() {
        return;
    }

    let mut seeds = unassigned.clone();
    seeds.sort_by(|&a, &b| {
        let round_trip = |idx: usize| cost.duration(0, idx) + cost.duration(idx, 0);
        round_trip(b)
            .partial_cmp(&round_trip(a))
            .expect("durations should not be NaN")
    });

    for (vehicle, profile) in fleet.iter().enumerate() {
        let seed = seeds.iter().copied().find(|&idx| {
            unassigned.contains(&idx) && single_stop_fits(idx, stops, profile)
        });
        if let Some(idx) = seed {
            routes[vehicle].push(idx);
            unassigned.retain(|&u| u != idx);
        }
    }
}

fn single_stop_fits(idx: usize, stops: &[Stop], vehicle: &VehicleProfile) -> bool {
    let mut load = Load::default();
    load.add_stop(&stops[idx - 1]);
    load.fits(vehicle)
}

/// Finds the cheapest feasible insertion across all unassigned stops.
///
/// Returns `(position in unassigned, vehicle, insertion position, delta)`.
fn best_insertion(
    unassigned: &[usize],
    routes: &[Vec<usize>],
    stops: &[Stop],
    fleet: &[VehicleProfile],
    cost: &CostModel,
) -> Option<(usize, usize, usize, f64)> {
    let mut best: Option<(usize, usize, usize, f64)> = None;
    for (list_pos, &stop_idx) in unassigned.iter().enumerate() {
        if let Some((vehicle, pos, delta)) = best_slot_for(stop_idx, routes, stops, fleet, cost) {
            let is_better = best.is_none_or(|(_, _, _, best_delta)| delta < best_delta);
            if is_better {
                best = Some((list_pos, vehicle, pos, delta));
            }
        }
    }
    best
}

/// Finds the cheapest feasible (vehicle, position) for one stop.
fn best_slot_for(
    stop_idx: usize,
    routes: &[Vec<usize>],
    stops: &[Stop],
    fleet: &[VehicleProfile],
    cost: &CostModel,
) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (vehicle, route) in routes.iter().enumerate() {
        let mut load = Load::from_sequence(route, stops);
        load.add_stop(&stops[stop_idx - 1]);
        if !load.fits(&fleet[vehicle]) {
            continue;
        }

        for pos in 0..=route.len() {
            let delta = insertion_cost(route, pos, stop_idx, cost);
            let is_better = best.is_none_or(|(_, _, best_delta)| delta < best_delta);
            if is_better {
                best = Some((vehicle, pos, delta));
            }
        }
    }
    best
}

/// Marginal duration of inserting `stop_idx` at `pos` in the sequence.
pub fn insertion_cost(seq: &[usize], pos: usize, stop_idx: usize, cost: &CostModel) -> f64 {
    let prev = if pos == 0 { 0 } else { seq[pos - 1] };
    let next = if pos == seq.len() { 0 } else { seq[pos] };

    // Old: prev → next
    // New: prev → stop → next
    cost.duration(prev, stop_idx) + cost.duration(stop_idx, next) - cost.duration(prev, next)
}
