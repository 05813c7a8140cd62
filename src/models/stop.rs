//! Rider records and pickup stops.

use serde::{Deserialize, Serialize};

/// Returns `true` if a free-text flag value marks an accessibility rider.
///
/// Accepts the spellings that show up in real rosters: `y`, `yes`, `true`,
/// `1`, in any case, with surrounding whitespace. Everything else — empty
/// strings included — is standard.
///
/// # Examples
///
/// ```
/// use paratransit_routing::models::accessibility_flag;
///
/// assert!(accessibility_flag("Yes"));
/// assert!(accessibility_flag(" y "));
/// assert!(accessibility_flag("1"));
/// assert!(!accessibility_flag("no"));
/// assert!(!accessibility_flag(""));
/// ```
pub fn accessibility_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "true" | "1"
    )
}

/// One raw roster row: a rider's name, pickup address, and whether the
/// rider needs an accessibility-equipped vehicle.
///
/// The textual flag is normalized to a boolean once, here — never
/// re-interpreted downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderRecord {
    name: String,
    address: String,
    requires_accessibility: bool,
}

impl RiderRecord {
    /// Creates a record with an already-normalized flag.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        requires_accessibility: bool,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            requires_accessibility,
        }
    }

    /// Creates a record from a free-text accessibility flag.
    pub fn from_flag(name: impl Into<String>, address: impl Into<String>, flag: &str) -> Self {
        Self::new(name, address, accessibility_flag(flag))
    }

    /// Rider name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pickup address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether this rider needs an accessibility vehicle.
    pub fn requires_accessibility(&self) -> bool {
        self.requires_accessibility
    }
}

/// A pickup stop: one address, the riders boarding there, and whether the
/// stop must be served by an accessibility vehicle.
///
/// Stops are created once per unique (address, eligibility) pair by
/// grouping roster records; the plan-mutation layer may later split or
/// merge rider membership.
///
/// # Examples
///
/// ```
/// use paratransit_routing::models::{RiderRecord, Stop};
///
/// let records = vec![
///     RiderRecord::from_flag("Ada", "12 Elm St", "no"),
///     RiderRecord::from_flag("Ben", "9 Oak Ave", "no"),
///     RiderRecord::from_flag("Cal", "12 Elm St", "no"),
/// ];
/// let stops = Stop::group_records(&records);
/// assert_eq!(stops.len(), 2);
/// assert_eq!(stops[0].address(), "12 Elm St");
/// assert_eq!(stops[0].riders(), ["Ada", "Cal"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    address: String,
    riders: Vec<String>,
    requires_accessibility: bool,
}

impl Stop {
    /// Creates a stop.
    pub fn new(
        address: impl Into<String>,
        riders: Vec<String>,
        requires_accessibility: bool,
    ) -> Self {
        Self {
            address: address.into(),
            riders,
            requires_accessibility,
        }
    }

    /// Groups roster records into stops, one per unique
    /// (address, eligibility) pair.
    ///
    /// Address order and rider order within an address both follow first
    /// appearance in the input.
    pub fn group_records(records: &[RiderRecord]) -> Vec<Stop> {
        let mut stops: Vec<Stop> = Vec::new();
        for record in records {
            let existing = stops.iter().position(|s| {
                s.address == record.address
                    && s.requires_accessibility == record.requires_accessibility
            });
            match existing {
                Some(pos) => stops[pos].riders.push(record.name.clone()),
                None => stops.push(Stop::new(
                    record.address.clone(),
                    vec![record.name.clone()],
                    record.requires_accessibility,
                )),
            }
        }
        stops
    }

    /// Pickup address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Riders boarding at this stop, in pickup order.
    pub fn riders(&self) -> &[String] {
        &self.riders
    }

    /// Number of riders at this stop.
    pub fn rider_count(&self) -> usize {
        self.riders.len()
    }

    /// Whether this stop requires an accessibility vehicle.
    pub fn requires_accessibility(&self) -> bool {
        self.requires_accessibility
    }

    /// Mutable access to the rider list (plan mutation only).
    pub(crate) fn riders_mut(&mut self) -> &mut Vec<String> {
        &mut self.riders
    }
}
