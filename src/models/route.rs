//! Per-vehicle routes.

use serde::{Deserialize, Serialize};

use super::stop::Stop;
use super::vehicle::Load;

/// Travel totals for one route, replayed from the pairwise cost model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    /// Total travel distance in meters, depot to depot.
    pub total_distance_m: f64,
    /// Total travel duration in seconds, depot to depot.
    pub total_duration_s: f64,
}

/// An ordered sequence of stops assigned to one vehicle.
///
/// The depot is the implicit start and end and never appears among the
/// stops. Metrics are `None` until replayed, and stay `None` when any leg
/// of the sequence is unreachable.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    vehicle_id: usize,
    stops: Vec<Stop>,
    metrics: Option<RouteMetrics>,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            stops: Vec::new(),
            metrics: None,
        }
    }

    /// The vehicle this route belongs to.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Stops in pickup order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if no stops are assigned.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Realized load across both rider classes.
    pub fn load(&self) -> Load {
        let mut load = Load::default();
        for stop in &self.stops {
            load.add_stop(stop);
        }
        load
    }

    /// Replayed travel totals, if every leg was reachable.
    pub fn metrics(&self) -> Option<RouteMetrics> {
        self.metrics
    }

    /// Position of the first stop at the given address, if any.
    pub fn position_of(&self, address: &str) -> Option<usize> {
        self.stops.iter().position(|s| s.address() == address)
    }

    /// Appends a stop.
    pub(crate) fn push_stop(&mut self, stop: Stop) {
        self.stops.push(stop);
    }

    /// Mutable access to the stop sequence (plan mutation only).
    pub(crate) fn stops_mut(&mut self) -> &mut Vec<Stop> {
        &mut self.stops
    }

    /// Sets the replayed metrics.
    pub(crate) fn set_metrics(&mut self, metrics: Option<RouteMetrics>) {
        self.metrics = metrics;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(address: &str, riders: &[&str], accessibility: bool) -> Stop {
        Stop::new(
            address,
            riders.iter().map(|r| r.to_string()).collect(),
            accessibility,
        )
    }

    #[test]
    fn test_route_empty() {
        let route = Route::new(3);
        assert_eq!(route.vehicle_id(), 3);
        assert!(route.is_empty());
        assert_eq!(route.load(), Load::default());
        assert!(route.metrics().is_none());
    }

    #[test]
    fn test_route_load_by_class() {
        let mut route = Route::new(0);
        route.push_stop(stop("A", &["Ada", "Ben"], true));
        route.push_stop(stop("B", &["Cal"], false));
        let load = route.load();
        assert_eq!(load.accessibility, 2);
        assert_eq!(load.standard, 1);
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn test_position_of() {
        let mut route = Route::new(0);
        route.push_stop(stop("A", &["Ada"], false));
        route.push_stop(stop("B", &["Ben"], false));
        assert_eq!(route.position_of("B"), Some(1));
        assert_eq!(route.position_of("C"), None);
    }

    #[test]
    fn test_set_metrics() {
        let mut route = Route::new(0);
        route.set_metrics(Some(RouteMetrics {
            total_distance_m: 5200.0,
            total_duration_s: 480.0,
        }));
        let metrics = route.metrics().expect("set");
        assert_eq!(metrics.total_duration_s, 480.0);
    }
}
