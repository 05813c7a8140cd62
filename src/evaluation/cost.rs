//! Search-time duration costs.

use crate::distance::TravelMatrix;

/// Penalty duration, in seconds, charged for an unreachable pair.
///
/// Large enough to dominate any real route so the search steers away from
/// undefined legs, yet finite so cost arithmetic stays ordered. The penalty
/// exists only inside the search objective: reported metrics come from
/// [`RouteEvaluator`](super::RouteEvaluator), which refuses to invent
/// numbers for unreachable legs.
pub const UNREACHABLE_PENALTY_S: f64 = 1.0e7;

/// Duration lookup over a travel matrix with the unreachable penalty
/// applied.
///
/// # Examples
///
/// ```
/// use paratransit_routing::distance::TravelMatrix;
/// use paratransit_routing::evaluation::{CostModel, UNREACHABLE_PENALTY_S};
/// use paratransit_routing::maps::Leg;
///
/// let leg = Some(Leg { distance_m: 1000.0, duration_s: 90.0 });
/// let tm = TravelMatrix::from_entries(2, vec![leg, leg, None, leg]).expect("valid");
/// let cost = CostModel::new(&tm);
/// assert_eq!(cost.duration(0, 1), 90.0);
/// assert_eq!(cost.duration(1, 0), UNREACHABLE_PENALTY_S);
/// ```
pub struct CostModel<'a> {
    matrix: &'a TravelMatrix,
    penalty: f64,
}

impl<'a> CostModel<'a> {
    /// Creates a cost model with the default penalty.
    pub fn new(matrix: &'a TravelMatrix) -> Self {
        Self {
            matrix,
            penalty: UNREACHABLE_PENALTY_S,
        }
    }

    /// Overrides the unreachable penalty.
    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    /// Travel duration from `from` to `to`, or the penalty if undefined.
    pub fn duration(&self, from: usize, to: usize) -> f64 {
        self.matrix.duration(from, to).unwrap_or(self.penalty)
    }

    /// Total duration of `depot → seq[0] → ... → seq[n-1] → depot`,
    /// penalty-priced. Zero for an empty sequence.
    pub fn route_duration(&self, seq: &[usize]) -> f64 {
        let Some(&first) = seq.first() else {
            return 0.0;
        };
        let mut total = self.duration(0, first);
        for pair in seq.windows(2) {
            total += self.duration(pair[0], pair[1]);
        }
        total += self.duration(seq[seq.len() - 1], 0);
        total
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &TravelMatrix {
        self.matrix
    }

    /// The configured penalty.
    pub fn penalty(&self) -> f64 {
        self.penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::Leg;

    fn line_matrix() -> TravelMatrix {
        // Four points on a line, duration = 60 s per step.
        let mut entries = Vec::new();
        for from in 0..4usize {
            for to in 0..4usize {
                let steps = from.abs_diff(to) as f64;
                entries.push(Some(Leg {
                    distance_m: steps * 1000.0,
                    duration_s: steps * 60.0,
                }));
            }
        }
        TravelMatrix::from_entries(4, entries).expect("valid")
    }

    #[test]
    fn test_duration_lookup() {
        let tm = line_matrix();
        let cost = CostModel::new(&tm);
        assert_eq!(cost.duration(0, 3), 180.0);
        assert_eq!(cost.duration(2, 2), 0.0);
    }

    #[test]
    fn test_penalty_for_unreachable() {
        let leg = Some(Leg {
            distance_m: 0.0,
            duration_s: 0.0,
        });
        let tm = TravelMatrix::from_entries(2, vec![leg, None, leg, leg]).expect("valid");
        let cost = CostModel::new(&tm).with_penalty(5000.0);
        assert_eq!(cost.duration(0, 1), 5000.0);
        assert_eq!(cost.duration(1, 0), 0.0);
    }

    #[test]
    fn test_route_duration() {
        let tm = line_matrix();
        let cost = CostModel::new(&tm);
        // 0→1→2→3→0 = 60 + 60 + 60 + 180
        assert_eq!(cost.route_duration(&[1, 2, 3]), 360.0);
        // 0→3→0
        assert_eq!(cost.route_duration(&[3]), 360.0);
        assert_eq!(cost.route_duration(&[]), 0.0);
    }
}
