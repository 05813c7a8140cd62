//! Vehicle capacity profiles and realized loads.

use serde::{Deserialize, Serialize};

use super::stop::Stop;

/// Per-vehicle seating profile.
///
/// A standard vehicle has only standard seats. An accessibility vehicle
/// carries two independent sub-limits — accessibility seats and standard
/// (overflow) seats — plus a total-seat cap that may be tighter than their
/// sum when the cabin is convertible.
///
/// # Examples
///
/// ```
/// use paratransit_routing::models::VehicleProfile;
///
/// let van = VehicleProfile::standard(0, 10);
/// assert_eq!(van.total_seats(), 10);
/// assert!(!van.carries_accessibility());
///
/// let lift_van = VehicleProfile::accessibility(1, 6, 1);
/// assert_eq!(lift_van.accessibility_seats(), 6);
/// assert_eq!(lift_van.standard_seats(), 1);
/// assert_eq!(lift_van.total_seats(), 7);
/// assert!(lift_van.carries_accessibility());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleProfile {
    id: usize,
    accessibility_seats: u32,
    standard_seats: u32,
    total_seats: u32,
}

impl VehicleProfile {
    /// Creates a standard vehicle with the given seat count.
    pub fn standard(id: usize, seats: u32) -> Self {
        Self {
            id,
            accessibility_seats: 0,
            standard_seats: seats,
            total_seats: seats,
        }
    }

    /// Creates an accessibility vehicle with independent seat sub-limits.
    ///
    /// Total seats default to the sum of both sub-limits.
    pub fn accessibility(id: usize, accessibility_seats: u32, standard_seats: u32) -> Self {
        Self {
            id,
            accessibility_seats,
            standard_seats,
            total_seats: accessibility_seats + standard_seats,
        }
    }

    /// Overrides the total-seat cap (convertible cabins).
    pub fn with_total_seats(mut self, total_seats: u32) -> Self {
        self.total_seats = total_seats;
        self
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Accessibility seat sub-limit.
    pub fn accessibility_seats(&self) -> u32 {
        self.accessibility_seats
    }

    /// Standard seat sub-limit.
    pub fn standard_seats(&self) -> u32 {
        self.standard_seats
    }

    /// Total seat cap.
    pub fn total_seats(&self) -> u32 {
        self.total_seats
    }

    /// Returns `true` if this vehicle may carry accessibility riders.
    pub fn carries_accessibility(&self) -> bool {
        self.accessibility_seats > 0
    }

    /// Builds a homogeneous standard fleet whose per-vehicle capacity is
    /// tightened so every vehicle ends up used.
    ///
    /// The forced capacity is the demand split evenly across the fleet,
    /// floored by the largest single stop (stops are atomic) and capped by
    /// the vehicles' real seat count.
    ///
    /// # Examples
    ///
    /// ```
    /// use paratransit_routing::models::VehicleProfile;
    ///
    /// let fleet = VehicleProfile::balanced_fleet(3, 14, 7, 10);
    /// assert_eq!(fleet.len(), 3);
    /// assert_eq!(fleet[0].total_seats(), 7);
    /// ```
    pub fn balanced_fleet(
        count: usize,
        total_riders: u32,
        largest_stop: u32,
        max_capacity: u32,
    ) -> Vec<VehicleProfile> {
        let vehicles = count.max(1) as u32;
        let spread = total_riders.div_ceil(vehicles);
        let forced = spread.max(largest_stop).max(1).min(max_capacity);
        (0..count).map(|id| Self::standard(id, forced)).collect()
    }
}

/// Realized rider counts on a route, split by eligibility class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Load {
    /// Accessibility riders.
    pub accessibility: u32,
    /// Standard riders.
    pub standard: u32,
}

impl Load {
    /// Total riders across both classes.
    pub fn total(self) -> u32 {
        self.accessibility + self.standard
    }

    /// Computes the load of a stop-index sequence.
    ///
    /// Sequences use travel-matrix indices: index 0 is the depot and
    /// `stops[i]` corresponds to index `i + 1`.
    pub fn from_sequence(seq: &[usize], stops: &[Stop]) -> Load {
        let mut load = Load::default();
        for &idx in seq {
            load.add_stop(&stops[idx - 1]);
        }
        load
    }

    /// Adds a stop's riders to this load.
    pub fn add_stop(&mut self, stop: &Stop) {
        let riders = stop.rider_count() as u32;
        if stop.requires_accessibility() {
            self.accessibility += riders;
        } else {
            self.standard += riders;
        }
    }

    /// Returns `true` if this load respects every limit of the profile:
    /// both sub-limits and the total cap.
    pub fn fits(self, vehicle: &VehicleProfile) -> bool {
        self.accessibility <= vehicle.accessibility_seats()
            && self.standard <= vehicle.standard_seats()
            && self.total() <= vehicle.total_seats()
    }
}
