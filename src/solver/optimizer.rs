//! End-to-end route optimization.
//!
//! # Pipeline
//!
//! 1. Geocode the depot (failure is unconditionally infeasible) and the
//!    stops (per-stop failures exclude the stop and become warnings).
//! 2. Build the travel matrix; an oracle failure aborts the call.
//! 3. Exclude stops the depot cannot reach, then run structural capacity
//!    checks on what remains.
//! 4. Construct an assignment by capacity-aware cheapest insertion, then
//!    improve it — 2-opt, relocate, exchange, plus a balance pass that
//!    relieves the longest route — under a wall-clock budget, restarting
//!    from seeded random perturbations while time remains.
//!
//! The objective is `Σ route duration + β · max route duration`: total
//! duration drives the search while the β term keeps one vehicle from
//! absorbing a marathon route. The budget is the only cancellation
//! mechanism — when it runs out, the best assignment found wins.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constructive::cheapest_insertion;
use crate::distance::{TravelMatrixBuilder, MAX_ELEMENTS_PER_REQUEST};
use crate::evaluation::{CostModel, RouteEvaluator, UNREACHABLE_PENALTY_S};
use crate::geocode::AddressResolver;
use crate::local_search::{exchange_improve, perturb, relocate_improve, two_opt_improve};
use crate::maps::MapsService;
use crate::models::{Load, Plan, Route, Stop, VehicleProfile};

use super::feasibility::{check_fleet_capacity, InfeasibleReason};
use super::outcome::{InfeasibleReport, OptimizeOutcome, SolveError};

/// Tunables for one optimization call.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Wall-clock budget for the improvement loop.
    pub time_budget: Duration,
    /// Weight β of the max-route-duration balance term.
    pub balance_weight: f64,
    /// Search-time penalty for unreachable legs, in seconds.
    pub unreachable_penalty: f64,
    /// Oracle element limit per travel-matrix call.
    pub max_elements_per_request: usize,
    /// Seed for the perturbation RNG; fixed seeds make runs reproducible.
    pub seed: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(10),
            balance_weight: 3.0,
            unreachable_penalty: UNREACHABLE_PENALTY_S,
            max_elements_per_request: MAX_ELEMENTS_PER_REQUEST,
            seed: 42,
        }
    }
}

/// Optimizes pickup routes for one fleet over a mapping oracle.
///
/// Calls are independent: each receives its own stops and fleet and
/// returns its own plan, so the standard and accessibility fleets can be
/// optimized in either order or in parallel.
pub struct RouteOptimizer<'a, S: MapsService> {
    service: &'a S,
    config: OptimizerConfig,
}

impl<'a, S: MapsService> RouteOptimizer<'a, S> {
    /// Creates an optimizer with default configuration.
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            config: OptimizerConfig::default(),
        }
    }

    /// Creates an optimizer with explicit configuration.
    pub fn with_config(service: &'a S, config: OptimizerConfig) -> Self {
        Self { service, config }
    }

    /// Computes a route plan for the given depot, stops, and fleet.
    ///
    /// # Errors
    ///
    /// Fails with [`SolveError`] only for oracle problems that leave no
    /// usable cost model. Everything else is expressed in the outcome:
    /// geocoding failures exclude stops, structural shortfalls and empty
    /// searches come back as [`OptimizeOutcome::Infeasible`].
    pub fn optimize(
        &self,
        depot_address: &str,
        stops: &[Stop],
        fleet: &[VehicleProfile],
    ) -> Result<OptimizeOutcome, SolveError> {
        let mut resolver = AddressResolver::new(self.service);

        let depot = match resolver.resolve(depot_address) {
            Ok(coords) => coords,
            Err(error) => {
                return Ok(OptimizeOutcome::Infeasible(InfeasibleReport {
                    reason: InfeasibleReason::DepotUnresolved {
                        address: depot_address.to_string(),
                        source: error,
                    },
                    unresolved: Vec::new(),
                }));
            }
        };

        // Empty stops carry no riders and are never retained.
        let stops: Vec<Stop> = stops
            .iter()
            .filter(|s| s.rider_count() > 0)
            .cloned()
            .collect();

        let addresses: Vec<&str> = stops.iter().map(Stop::address).collect();
        let (coordinates, unresolved) = resolver.resolve_all(&addresses);

        // Stops that survived geocoding, in input order. matrix_stops[i]
        // corresponds to matrix index i + 1.
        let mut points = vec![depot];
        let mut matrix_stops: Vec<Stop> = Vec::new();
        for (stop, coords) in stops.iter().zip(&coordinates) {
            if let Some(coords) = coords {
                points.push(*coords);
                matrix_stops.push(stop.clone());
            }
        }

        let builder = TravelMatrixBuilder::new(self.service)
            .with_max_elements(self.config.max_elements_per_request);
        let matrix = builder.build(&points)?;

        // Split off stops the depot cannot reach (either direction).
        let mut routable: Vec<usize> = Vec::new();
        let mut unroutable: Vec<String> = Vec::new();
        for idx in 1..matrix.size() {
            if matrix.is_reachable(0, idx) && matrix.is_reachable(idx, 0) {
                routable.push(idx);
            } else {
                let address = matrix_stops[idx - 1].address().to_string();
                log::warn!("stop `{address}` is unreachable from the depot; excluding it");
                unroutable.push(address);
            }
        }

        let routable_stops: Vec<Stop> = routable
            .iter()
            .map(|&idx| matrix_stops[idx - 1].clone())
            .collect();
        if let Err(reason) = check_fleet_capacity(&routable_stops, fleet) {
            return Ok(OptimizeOutcome::Infeasible(InfeasibleReport {
                reason,
                unresolved,
            }));
        }

        let cost = CostModel::new(&matrix).with_penalty(self.config.unreachable_penalty);
        let Some(routes) = self.search(&routable, &matrix_stops, fleet, &cost) else {
            return Ok(OptimizeOutcome::Infeasible(InfeasibleReport {
                reason: InfeasibleReason::NoSolutionWithinBudget,
                unresolved,
            }));
        };

        let evaluator = RouteEvaluator::new(&matrix);
        let mut plan_routes = Vec::with_capacity(fleet.len());
        for (vehicle, seq) in fleet.iter().zip(&routes) {
            let mut route = Route::new(vehicle.id());
            for &idx in seq {
                route.push_stop(matrix_stops[idx - 1].clone());
            }
            route.set_metrics(evaluator.replay(seq));
            plan_routes.push(route);
        }

        let stop_indices: HashMap<String, usize> = matrix_stops
            .iter()
            .enumerate()
            .map(|(i, stop)| (stop.address().to_string(), i + 1))
            .collect();

        log::debug!(
            "optimized {} stops across {} vehicles ({} unresolved, {} unroutable)",
            routable.len(),
            fleet.len(),
            unresolved.len(),
            unroutable.len()
        );

        Ok(OptimizeOutcome::Feasible(Plan::new(
            plan_routes,
            fleet.to_vec(),
            matrix,
            stop_indices,
            unresolved,
            unroutable,
        )))
    }

    /// Construction plus budget-bounded improvement.
    fn search(
        &self,
        routable: &[usize],
        stops: &[Stop],
        fleet: &[VehicleProfile],
        cost: &CostModel,
    ) -> Option<Vec<Vec<usize>>> {
        let deadline = Instant::now() + self.config.time_budget;
        let keep_nonempty = routable.len() >= fleet.len();

        let mut best = cheapest_insertion(routable, stops, fleet, cost)?;
        self.improve(&mut best, stops, fleet, cost, keep_nonempty, deadline);
        let mut best_objective = self.objective(&best, cost);

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        while Instant::now() < deadline {
            let mut candidate = best.clone();
            perturb(&mut candidate, stops, fleet, &mut rng, 3, keep_nonempty);
            self.improve(&mut candidate, stops, fleet, cost, keep_nonempty, deadline);
            let objective = self.objective(&candidate, cost);
            if objective < best_objective - 1e-9 {
                best = candidate;
                best_objective = objective;
            }
        }

        Some(best)
    }

    /// One improvement round: 2-opt per route, relocate, exchange, and the
    /// balance pass, repeated until the total stops improving or the
    /// deadline passes.
    fn improve(
        &self,
        routes: &mut Vec<Vec<usize>>,
        stops: &[Stop],
        fleet: &[VehicleProfile],
        cost: &CostModel,
        keep_nonempty: bool,
        deadline: Instant,
    ) {
        loop {
            let before = self.objective(routes, cost);

            for seq in routes.iter_mut() {
                let (improved, _) = two_opt_improve(seq, cost);
                *seq = improved;
            }
            if Instant::now() >= deadline {
                return;
            }

            *routes = relocate_improve(routes, stops, fleet, cost, keep_nonempty);
            if Instant::now() >= deadline {
                return;
            }

            *routes = exchange_improve(routes, stops, fleet, cost, keep_nonempty);
            self.balance(routes, stops, fleet, cost, keep_nonempty);

            let after = self.objective(routes, cost);
            if after >= before - 1e-9 || Instant::now() >= deadline {
                return;
            }
        }
    }

    /// Relieves the longest route: moves one of its stops elsewhere while
    /// the full objective (including the β term) improves.
    fn balance(
        &self,
        routes: &mut Vec<Vec<usize>>,
        stops: &[Stop],
        fleet: &[VehicleProfile],
        cost: &CostModel,
        keep_nonempty: bool,
    ) {
        let min_len = if keep_nonempty { 1 } else { 0 };
        loop {
            let current_objective = self.objective(routes, cost);
            let longest = match routes
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| {
                    cost.route_duration(a)
                        .partial_cmp(&cost.route_duration(b))
                        .expect("durations should not be NaN")
                })
                .map(|(i, _)| i)
            {
                Some(i) if routes[i].len() > min_len => i,
                _ => return,
            };

            let mut best: Option<(usize, usize, usize, f64)> = None;
            for from_pos in 0..routes[longest].len() {
                let stop_idx = routes[longest][from_pos];
                for to_route in 0..routes.len() {
                    if to_route == longest {
                        continue;
                    }
                    let mut load = Load::from_sequence(&routes[to_route], stops);
                    load.add_stop(&stops[stop_idx - 1]);
                    if !load.fits(&fleet[to_route]) {
                        continue;
                    }

                    for to_pos in 0..=routes[to_route].len() {
                        let mut candidate = routes.clone();
                        let moved = candidate[longest].remove(from_pos);
                        candidate[to_route].insert(to_pos, moved);
                        let objective = self.objective(&candidate, cost);
                        let is_better =
                            best.is_none_or(|(_, _, _, best_obj)| objective < best_obj);
                        if objective < current_objective - 1e-9 && is_better {
                            best = Some((from_pos, to_route, to_pos, objective));
                        }
                    }
                }
            }

            match best {
                Some((from_pos, to_route, to_pos, _)) => {
                    let moved = routes[longest].remove(from_pos);
                    routes[to_route].insert(to_pos, moved);
                }
                None => return,
            }
        }
    }

    /// `Σ route duration + β · max route duration`, penalty-priced.
    fn objective(&self, routes: &[Vec<usize>], cost: &CostModel) -> f64 {
        let mut total = 0.0;
        let mut longest = 0.0_f64;
        for seq in routes {
            let duration = cost.route_duration(seq);
            total += duration;
            longest = longest.max(duration);
        }
        total + self.config.balance_weight * longest
    }
}
