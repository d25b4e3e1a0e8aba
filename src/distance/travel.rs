//! Paired cost and duration matrices.

use super::ArcMatrix;
use crate::error::{SolveError, SpecError};

/// Cost and duration of every arc between locations.
///
/// Durations already include any fixed service time at the origin node, so
/// time propagation adds `duration(i, j)` and nothing else. An infinite
/// cost or duration marks the arc as non-traversable.
///
/// The value is immutable once built and can be shared across search
/// threads without synchronization.
///
/// # Examples
///
/// ```
/// use vrptw_solver::distance::TravelMatrix;
///
/// let tm = TravelMatrix::from_fns(
///     3,
///     |i, j| (i as f64 - j as f64).abs(),
///     |i, j| 60.0 + (i as f64 - j as f64).abs(),
/// )
/// .unwrap();
/// assert_eq!(tm.cost(0, 2), 2.0);
/// assert_eq!(tm.duration(0, 2), 62.0);
/// assert!(tm.is_traversable(2, 0));
/// ```
#[derive(Debug, Clone)]
pub struct TravelMatrix {
    cost: ArcMatrix,
    duration: ArcMatrix,
}

impl TravelMatrix {
    /// Pairs a cost and a duration matrix of the same size.
    ///
    /// Fails on a size mismatch, or if any entry is NaN or negative.
    pub fn new(cost: ArcMatrix, duration: ArcMatrix) -> Result<Self, SolveError> {
        if cost.size() != duration.size() {
            return Err(SpecError::DimensionMismatch {
                what: "duration matrix",
                expected: cost.size(),
                found: duration.size(),
            }
            .into());
        }
        if let Some((from, to)) = cost.find_invalid().or_else(|| duration.find_invalid()) {
            return Err(SolveError::MatrixIncomplete { from, to });
        }
        Ok(Self { cost, duration })
    }

    /// Materializes accessor callbacks over every ordered pair of `size` nodes.
    pub fn from_fns<C, D>(size: usize, cost: C, duration: D) -> Result<Self, SolveError>
    where
        C: Fn(usize, usize) -> f64,
        D: Fn(usize, usize) -> f64,
    {
        let mut cost_matrix = ArcMatrix::new(size);
        let mut duration_matrix = ArcMatrix::new(size);
        for i in 0..size {
            for j in 0..size {
                cost_matrix.set(i, j, cost(i, j));
                duration_matrix.set(i, j, duration(i, j));
            }
        }
        Self::new(cost_matrix, duration_matrix)
    }

    /// Builds a matrix from a provider table where `None` means no route.
    ///
    /// Missing routes become infinite arcs rather than zero-cost ones.
    pub fn from_provider_rows(
        costs: &[Vec<Option<f64>>],
        durations: &[Vec<Option<f64>>],
    ) -> Result<Self, SolveError> {
        let cost = provider_matrix(costs, "cost matrix")?;
        let duration = provider_matrix(durations, "duration matrix")?;
        Self::new(cost, duration)
    }

    /// Cost of arc `from → to`.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.cost.get(from, to)
    }

    /// Duration of arc `from → to`, service time included.
    pub fn duration(&self, from: usize, to: usize) -> f64 {
        self.duration.get(from, to)
    }

    /// Returns `true` if both cost and duration of `from → to` are finite.
    pub fn is_traversable(&self, from: usize, to: usize) -> bool {
        self.cost.is_reachable(from, to) && self.duration.is_reachable(from, to)
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.cost.size()
    }
}

fn provider_matrix(rows: &[Vec<Option<f64>>], what: &'static str) -> Result<ArcMatrix, SolveError> {
    let size = rows.len();
    if let Some(row) = rows.iter().find(|row| row.len() != size) {
        return Err(SpecError::DimensionMismatch {
            what,
            expected: size,
            found: row.len(),
        }
        .into());
    }
    let filled: Vec<Vec<f64>> = rows
        .iter()
        .map(|row| row.iter().map(|v| v.unwrap_or(f64::INFINITY)).collect())
        .collect();
    ArcMatrix::from_rows(&filled).ok_or(
        SpecError::DimensionMismatch {
            what,
            expected: size,
            found: filled.len(),
        }
        .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fns() {
        let tm = TravelMatrix::from_fns(2, |_, _| 3.0, |_, _| 4.0).expect("valid");
        assert_eq!(tm.size(), 2);
        assert_eq!(tm.cost(0, 1), 3.0);
        assert_eq!(tm.duration(1, 0), 4.0);
    }

    #[test]
    fn test_provider_none_is_unreachable() {
        let costs = vec![vec![Some(0.0), None], vec![Some(2.0), Some(0.0)]];
        let durations = vec![vec![Some(0.0), Some(1.0)], vec![Some(2.0), Some(0.0)]];
        let tm = TravelMatrix::from_provider_rows(&costs, &durations).expect("valid");
        assert!(tm.cost(0, 1).is_infinite());
        assert!(!tm.is_traversable(0, 1));
        assert!(tm.is_traversable(1, 0));
    }

    #[test]
    fn test_infinite_duration_blocks_arc() {
        let tm = TravelMatrix::from_fns(
            2,
            |_, _| 1.0,
            |i, j| if i == 1 && j == 0 { f64::INFINITY } else { 1.0 },
        )
        .expect("valid");
        assert!(tm.is_traversable(0, 1));
        assert!(!tm.is_traversable(1, 0));
    }

    #[test]
    fn test_nan_rejected() {
        let err = TravelMatrix::from_fns(
            3,
            |i, j| if i == 2 && j == 0 { f64::NAN } else { 1.0 },
            |_, _| 1.0,
        )
        .unwrap_err();
        assert_eq!(err, SolveError::MatrixIncomplete { from: 2, to: 0 });
    }

    #[test]
    fn test_junk_diagonal_accepted() {
        let tm = TravelMatrix::from_fns(
            2,
            |i, j| if i == j { f64::NAN } else { 1.0 },
            |i, j| if i == j { -1.0 } else { 1.0 },
        )
        .expect("valid");
        assert!((tm.cost(0, 1) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = TravelMatrix::from_fns(2, |_, _| 1.0, |_, _| -5.0).unwrap_err();
        assert!(matches!(err, SolveError::MatrixIncomplete { .. }));
    }

    #[test]
    fn test_ragged_provider_rows() {
        let costs = vec![vec![Some(0.0), Some(1.0)], vec![Some(1.0)]];
        let durations = costs.clone();
        let err = TravelMatrix::from_provider_rows(&costs, &durations).unwrap_err();
        assert!(matches!(
            err,
            SolveError::InvalidSpec(SpecError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_size_mismatch() {
        let err = TravelMatrix::new(ArcMatrix::new(2), ArcMatrix::new(3)).unwrap_err();
        assert!(matches!(
            err,
            SolveError::InvalidSpec(SpecError::DimensionMismatch {
                expected: 2,
                found: 3,
                ..
            })
        ));
    }
}
