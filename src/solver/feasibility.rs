//! Pre-search feasibility checks.
//!
//! Structural infeasibility — a stop no vehicle can swallow, or demand
//! beyond the fleet — is detected before any search runs, so the solver
//! can report a precise reason instead of timing out on an impossible
//! instance.

use std::fmt;

use thiserror::Error;

use crate::maps::GeocodeError;
use crate::models::{Stop, VehicleProfile};

/// Rider eligibility class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiderClass {
    /// Riders needing an accessibility-equipped vehicle.
    Accessibility,
    /// Everyone else.
    Standard,
}

impl fmt::Display for RiderClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accessibility => write!(f, "accessibility"),
            Self::Standard => write!(f, "standard"),
        }
    }
}

/// Why no feasible plan exists for an instance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InfeasibleReason {
    /// The depot address failed geocoding; no routes can be computed
    /// without a start/end reference.
    #[error("depot `{address}` could not be geocoded: {source}")]
    DepotUnresolved {
        /// The depot address as submitted.
        address: String,
        /// The underlying geocoding failure.
        source: GeocodeError,
    },
    /// One stop's rider count exceeds every eligible vehicle. Stops are
    /// atomic — riders at one address ride together.
    #[error("stop `{address}` has {riders} riders but the largest eligible vehicle seats {seats}")]
    StopExceedsVehicleCapacity {
        /// The offending stop's address.
        address: String,
        /// Riders at that stop.
        riders: u32,
        /// Seats on the largest vehicle eligible for the stop's class.
        seats: u32,
    },
    /// One class's total demand exceeds the fleet's seats for that class.
    #[error("{demand} {class} riders exceed the fleet's {capacity} {class} seats")]
    DemandExceedsFleetCapacity {
        /// The over-subscribed class.
        class: RiderClass,
        /// Riders of that class.
        demand: u32,
        /// Fleet seats for that class.
        capacity: u32,
    },
    /// Combined demand exceeds the fleet's total seat caps.
    #[error("total demand {demand} exceeds the fleet's {capacity} seats")]
    TotalDemandExceedsFleetCapacity {
        /// Total riders.
        demand: u32,
        /// Total fleet seats.
        capacity: u32,
    },
    /// The search produced no complete assignment within its budget.
    #[error("no feasible assignment found within the time budget")]
    NoSolutionWithinBudget,
}

/// Seats a vehicle can offer a stop of the given class, respecting the
/// total cap.
fn eligible_seats(vehicle: &VehicleProfile, accessibility: bool) -> u32 {
    let class_seats = if accessibility {
        vehicle.accessibility_seats()
    } else {
        vehicle.standard_seats()
    };
    class_seats.min(vehicle.total_seats())
}

/// Checks structural capacity feasibility of an instance.
///
/// Verifies that every stop fits at least one eligible vehicle and that
/// per-class and total demand fit the fleet. Passing these checks does not
/// guarantee a packing exists — the search can still come up empty — but
/// failing them is a definite infeasibility.
pub fn check_fleet_capacity(
    stops: &[Stop],
    fleet: &[VehicleProfile],
) -> Result<(), InfeasibleReason> {
    for stop in stops {
        let riders = stop.rider_count() as u32;
        let seats = fleet
            .iter()
            .map(|v| eligible_seats(v, stop.requires_accessibility()))
            .max()
            .unwrap_or(0);
        if riders > seats {
            return Err(InfeasibleReason::StopExceedsVehicleCapacity {
                address: stop.address().to_string(),
                riders,
                seats,
            });
        }
    }

    for class in [RiderClass::Accessibility, RiderClass::Standard] {
        let accessibility = class == RiderClass::Accessibility;
        let demand: u32 = stops
            .iter()
            .filter(|s| s.requires_accessibility() == accessibility)
            .map(|s| s.rider_count() as u32)
            .sum();
        let capacity: u32 = fleet.iter().map(|v| eligible_seats(v, accessibility)).sum();
        if demand > capacity {
            return Err(InfeasibleReason::DemandExceedsFleetCapacity {
                class,
                demand,
                capacity,
            });
        }
    }

    let demand: u32 = stops.iter().map(|s| s.rider_count() as u32).sum();
    let capacity: u32 = fleet.iter().map(VehicleProfile::total_seats).sum();
    if demand > capacity {
        return Err(InfeasibleReason::TotalDemandExceedsFleetCapacity { demand, capacity });
    }

    Ok(())
}
