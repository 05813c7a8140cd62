//! Exact route-metric replay.

use crate::distance::TravelMatrix;
use crate::models::RouteMetrics;

/// Replays a stop sequence against the travel matrix, accumulating exact
/// distance and duration from depot back to depot.
///
/// This is the single source of route metrics: the optimizer uses it to
/// stamp freshly built routes and the plan-mutation layer uses it to
/// re-score edited routes, so the two can never disagree. Unlike the
/// search-time [`CostModel`](super::CostModel), the replay refuses to
/// price an unreachable leg — it returns `None` instead.
///
/// # Examples
///
/// ```
/// use paratransit_routing::distance::TravelMatrix;
/// use paratransit_routing::evaluation::RouteEvaluator;
/// use paratransit_routing::maps::Leg;
///
/// let leg = |d: f64| Some(Leg { distance_m: d, duration_s: d / 10.0 });
/// let tm = TravelMatrix::from_entries(
///     2,
///     vec![leg(0.0), leg(800.0), leg(900.0), leg(0.0)],
/// ).expect("valid");
///
/// let metrics = RouteEvaluator::new(&tm).replay(&[1]).expect("reachable");
/// assert_eq!(metrics.total_distance_m, 1700.0);
/// assert_eq!(metrics.total_duration_s, 170.0);
/// ```
pub struct RouteEvaluator<'a> {
    matrix: &'a TravelMatrix,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator over the given matrix.
    pub fn new(matrix: &'a TravelMatrix) -> Self {
        Self { matrix }
    }

    /// Replays `depot → seq[0] → ... → seq[n-1] → depot`.
    ///
    /// Returns zeroed metrics for an empty sequence and `None` when any
    /// leg is unreachable.
    pub fn replay(&self, seq: &[usize]) -> Option<RouteMetrics> {
        let Some(&first) = seq.first() else {
            return Some(RouteMetrics {
                total_distance_m: 0.0,
                total_duration_s: 0.0,
            });
        };

        let mut total_distance_m = 0.0;
        let mut total_duration_s = 0.0;
        let mut add = |from: usize, to: usize| -> Option<()> {
            let leg = self.matrix.get(from, to)?;
            total_distance_m += leg.distance_m;
            total_duration_s += leg.duration_s;
            Some(())
        };

        add(0, first)?;
        for pair in seq.windows(2) {
            add(pair[0], pair[1])?;
        }
        add(seq[seq.len() - 1], 0)?;

        Some(RouteMetrics {
            total_distance_m,
            total_duration_s,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::Leg;

    fn line_matrix() -> TravelMatrix {
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
    fn test_replay_empty() {
        let tm = line_matrix();
        let metrics = RouteEvaluator::new(&tm).replay(&[]).expect("defined");
        assert_eq!(metrics.total_distance_m, 0.0);
        assert_eq!(metrics.total_duration_s, 0.0);
    }

    #[test]
    fn test_replay_chain() {
        let tm = line_matrix();
        // 0→1→2→3→0: 1 + 1 + 1 + 3 steps
        let metrics = RouteEvaluator::new(&tm).replay(&[1, 2, 3]).expect("defined");
        assert_eq!(metrics.total_distance_m, 6000.0);
        assert_eq!(metrics.total_duration_s, 360.0);
    }

    #[test]
    fn test_replay_is_order_sensitive() {
        let tm = line_matrix();
        let evaluator = RouteEvaluator::new(&tm);
        let forward = evaluator.replay(&[1, 2, 3]).expect("defined");
        let shuffled = evaluator.replay(&[2, 1, 3]).expect("defined");
        assert!(shuffled.total_duration_s > forward.total_duration_s);
    }

    #[test]
    fn test_replay_idempotent() {
        let tm = line_matrix();
        let evaluator = RouteEvaluator::new(&tm);
        let first = evaluator.replay(&[3, 1, 2]).expect("defined");
        let second = evaluator.replay(&[3, 1, 2]).expect("defined");
        assert_eq!(first, second);
    }

    #[test]
    fn test_replay_unreachable_leg() {
        let leg = Some(Leg {
            distance_m: 100.0,
            duration_s: 10.0,
        });
        // 1→0 missing: the return leg is undefined.
        let tm = TravelMatrix::from_entries(2, vec![leg, leg, None, leg]).expect("valid");
        assert!(RouteEvaluator::new(&tm).replay(&[1]).is_none());
    }
}
