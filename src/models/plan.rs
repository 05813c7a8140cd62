//! The plan: one optimization session's complete route set.

use std::collections::HashMap;

use crate::distance::TravelMatrix;
use crate::geocode::GeocodeFailure;

use super::route::Route;
use super::vehicle::VehicleProfile;

/// The complete set of per-vehicle routes for one optimization session,
/// plus the stops that could not be geocoded or routed.
///
/// A plan is a plain value owned by the caller. Edits mutate it in place
/// through the [`mutation`](crate::mutation) module while the pristine
/// optimized snapshot is retained, so the caller can always
/// [`reset_to_optimized`](Plan::reset_to_optimized). The travel matrix and
/// the address→index map built during optimization travel with the plan so
/// edited routes can be re-scored without re-optimizing.
#[derive(Debug, Clone)]
pub struct Plan {
    routes: Vec<Route>,
    optimized: Vec<Route>,
    vehicles: Vec<VehicleProfile>,
    matrix: TravelMatrix,
    stop_indices: HashMap<String, usize>,
    unresolved: Vec<GeocodeFailure>,
    unroutable: Vec<String>,
}

impl Plan {
    /// Assembles a plan from an optimization run. The given routes become
    /// both the live state and the pristine snapshot.
    pub(crate) fn new(
        routes: Vec<Route>,
        vehicles: Vec<VehicleProfile>,
        matrix: TravelMatrix,
        stop_indices: HashMap<String, usize>,
        unresolved: Vec<GeocodeFailure>,
        unroutable: Vec<String>,
    ) -> Self {
        Self {
            optimized: routes.clone(),
            routes,
            vehicles,
            matrix,
            stop_indices,
            unresolved,
            unroutable,
        }
    }

    /// Current routes, one per vehicle (possibly empty).
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Mutable route access (plan mutation only).
    pub(crate) fn routes_mut(&mut self) -> &mut [Route] {
        &mut self.routes
    }

    /// The fleet this plan was optimized for.
    pub fn vehicles(&self) -> &[VehicleProfile] {
        &self.vehicles
    }

    /// Looks up a vehicle profile by ID.
    pub fn vehicle(&self, vehicle_id: usize) -> Option<&VehicleProfile> {
        self.vehicles.iter().find(|v| v.id() == vehicle_id)
    }

    /// Position of a vehicle's route in [`routes`](Plan::routes).
    pub(crate) fn route_index(&self, vehicle_id: usize) -> Option<usize> {
        self.routes.iter().position(|r| r.vehicle_id() == vehicle_id)
    }

    /// The travel matrix built for this session.
    pub fn matrix(&self) -> &TravelMatrix {
        &self.matrix
    }

    /// Matrix index of a stop address (0 is the depot).
    pub fn matrix_index(&self, address: &str) -> Option<usize> {
        self.stop_indices.get(address).copied()
    }

    /// Addresses that failed geocoding, with their errors.
    pub fn unresolved(&self) -> &[GeocodeFailure] {
        &self.unresolved
    }

    /// Addresses excluded because the depot cannot reach them.
    pub fn unroutable(&self) -> &[String] {
        &self.unroutable
    }

    /// All addresses left out of the routes: geocoding failures first,
    /// then unroutable stops.
    pub fn unassigned_addresses(&self) -> Vec<String> {
        self.unresolved
            .iter()
            .map(|f| f.address.clone())
            .chain(self.unroutable.iter().cloned())
            .collect()
    }

    /// Every rider currently assigned to a route, in route order.
    pub fn rider_names(&self) -> Vec<&str> {
        self.routes
            .iter()
            .flat_map(|route| route.stops())
            .flat_map(|stop| stop.riders())
            .map(String::as_str)
            .collect()
    }

    /// Discards all edits and restores the optimized routes.
    pub fn reset_to_optimized(&mut self) {
        self.routes = self.optimized.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::{GeocodeError, Leg};
    use crate::models::Stop;

    fn two_point_matrix() -> TravelMatrix {
        let leg = Some(Leg {
            distance_m: 1000.0,
            duration_s: 100.0,
        });
        TravelMatrix::from_entries(2, vec![leg, leg, leg, leg]).expect("valid")
    }

    fn sample_plan() -> Plan {
        let mut route = Route::new(0);
        route.push_stop(Stop::new("12 Elm St", vec!["Ada".into()], false));
        Plan::new(
            vec![route, Route::new(1)],
            vec![VehicleProfile::standard(0, 10), VehicleProfile::standard(1, 10)],
            two_point_matrix(),
            HashMap::from([("12 Elm St".to_string(), 1)]),
            vec![GeocodeFailure {
                index: 1,
                address: "nowhere".into(),
                error: GeocodeError::NotFound {
                    address: "nowhere".into(),
                },
            }],
            vec!["island".into()],
        )
    }

    #[test]
    fn test_lookups() {
        let plan = sample_plan();
        assert_eq!(plan.routes().len(), 2);
        assert_eq!(plan.vehicle(1).expect("exists").id(), 1);
        assert!(plan.vehicle(9).is_none());
        assert_eq!(plan.matrix_index("12 Elm St"), Some(1));
        assert_eq!(plan.matrix_index("unknown"), None);
        assert_eq!(plan.route_index(1), Some(1));
    }

    #[test]
    fn test_unassigned_addresses_merges_both_lists() {
        let plan = sample_plan();
        assert_eq!(plan.unassigned_addresses(), ["nowhere", "island"]);
    }

    #[test]
    fn test_rider_names() {
        let plan = sample_plan();
        assert_eq!(plan.rider_names(), ["Ada"]);
    }

    #[test]
    fn test_reset_to_optimized() {
        let mut plan = sample_plan();
        plan.routes_mut()[0].stops_mut().clear();
        assert!(plan.routes()[0].is_empty());
        plan.reset_to_optimized();
        assert_eq!(plan.routes()[0].len(), 1);
        assert_eq!(plan.rider_names(), ["Ada"]);
    }
}
