//! Edit descriptors.

use serde::{Deserialize, Serialize};

/// Where a new stop lands in the target route's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertPosition {
    /// First pickup of the route.
    Start,
    /// Last pickup of the route.
    End,
    /// Exact position (0-based); must not exceed the route length.
    At(usize),
}

/// One (vehicle, stop-address) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRef {
    /// The vehicle whose route holds the stop.
    pub vehicle_id: usize,
    /// The stop's address.
    pub address: String,
}

impl StopRef {
    /// Creates a stop reference.
    pub fn new(vehicle_id: usize, address: impl Into<String>) -> Self {
        Self {
            vehicle_id,
            address: address.into(),
        }
    }
}

/// One atomic plan edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanEdit {
    /// Move a named rider between (vehicle, stop-address) pairs.
    ///
    /// If the target route has no stop at the target address for the
    /// rider's class, one is created at `position`; a stop emptied by the
    /// move is dropped.
    MoveRider {
        /// The rider to move.
        rider: String,
        /// Where the rider boards now.
        from: StopRef,
        /// Where the rider should board instead.
        to: StopRef,
        /// Placement of a newly created stop.
        position: InsertPosition,
    },
    /// Reorder one vehicle's stop sequence.
    ///
    /// `order` must be a permutation of the route's current addresses.
    ReorderStops {
        /// The vehicle whose route is reordered.
        vehicle_id: usize,
        /// The new address order.
        order: Vec<String>,
    },
    /// Reorder the riders within one stop. Cosmetic: no constraint or
    /// metric impact.
    ReorderRiders {
        /// The vehicle whose route holds the stop.
        vehicle_id: usize,
        /// The stop's address.
        address: String,
        /// The new rider order.
        order: Vec<String>,
    },
}
