//! Dense travel matrix.

use crate::maps::Leg;

/// A dense n×n travel matrix stored in row-major order.
///
/// Each entry is the directed leg from one point to another, or `None`
/// when the pair is unreachable. Index 0 is the depot by convention;
/// indices `1..n` are stops. Built once per optimization call and never
/// mutated afterwards.
///
/// # Examples
///
/// ```
/// use paratransit_routing::distance::TravelMatrix;
/// use paratransit_routing::maps::Leg;
///
/// let leg = |d: f64| Some(Leg { distance_m: d, duration_s: d / 10.0 });
/// let tm = TravelMatrix::from_entries(2, vec![leg(0.0), leg(500.0), leg(600.0), leg(0.0)])
///     .expect("valid");
/// assert_eq!(tm.size(), 2);
/// assert_eq!(tm.duration(0, 1), Some(50.0));
/// assert!(tm.is_reachable(1, 0));
/// ```
#[derive(Debug, Clone)]
pub struct TravelMatrix {
    entries: Vec<Option<Leg>>,
    size: usize,
}

impl TravelMatrix {
    /// Creates a matrix of the given size with every pair unreachable.
    pub(crate) fn new(size: usize) -> Self {
        Self {
            entries: vec![None; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit n×n entry grid.
    ///
    /// Returns `None` if the entry count doesn't match `size * size`.
    pub fn from_entries(size: usize, entries: Vec<Option<Leg>>) -> Option<Self> {
        if entries.len() != size * size {
            return None;
        }
        Some(Self { entries, size })
    }

    /// Returns the leg from point `from` to point `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> Option<Leg> {
        self.entries[from * self.size + to]
    }

    /// Sets the leg from point `from` to point `to`.
    pub(crate) fn set(&mut self, from: usize, to: usize, leg: Option<Leg>) {
        self.entries[from * self.size + to] = leg;
    }

    /// Travel duration in seconds, or `None` if the pair is unreachable.
    pub fn duration(&self, from: usize, to: usize) -> Option<f64> {
        self.get(from, to).map(|leg| leg.duration_s)
    }

    /// Travel distance in meters, or `None` if the pair is unreachable.
    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        self.get(from, to).map(|leg| leg.distance_m)
    }

    /// Returns `true` if the pair has a defined leg.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_some()
    }

    /// Number of points in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}
