//! Error types returned by problem validation and solving.

use thiserror::Error;

/// A structural problem with the caller's input.
///
/// Raised before any construction work starts. The caller can always
/// recover by fixing the offending input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("{what} has {found} entries, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("node {node} has negative demand {demand}")]
    NegativeDemand { node: usize, demand: i32 },

    #[error("node {node} has malformed time window [{earliest}, {latest}]")]
    MalformedTimeWindow {
        node: usize,
        earliest: f64,
        latest: f64,
    },

    #[error("vehicle {vehicle} has negative capacity {capacity}")]
    NegativeCapacity { vehicle: usize, capacity: i32 },

    #[error("depot {depot} is out of range for {num_nodes} nodes")]
    DepotOutOfRange { depot: usize, num_nodes: usize },

    #[error("depot {depot} must have zero demand, got {demand}")]
    DepotDemand { depot: usize, demand: i32 },

    #[error("{found} per-vehicle capacities given for {expected} vehicles")]
    CapacityCountMismatch { expected: usize, found: usize },

    #[error("lock binds node {node} to vehicle {vehicle}, which does not exist")]
    LockOutOfRange { vehicle: usize, node: usize },

    #[error("lock binds node {node} to vehicle {vehicle}, but there are only {num_nodes} nodes")]
    LockedNodeOutOfRange {
        vehicle: usize,
        node: usize,
        num_nodes: usize,
    },

    #[error("depot {node} cannot be locked to a vehicle")]
    LockedDepot { node: usize },

    #[error("node {node} is locked to both vehicle {first} and vehicle {second}")]
    ConflictingLock {
        node: usize,
        first: usize,
        second: usize,
    },

    #[error("time horizon must be finite and non-negative, got {0}")]
    NonFiniteHorizon(f64),
}

/// Failure of a solve call.
///
/// Partial infeasibility and an expired time budget are not errors: they
/// show up as unrouted nodes and as the search's terminal state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("invalid problem spec: {0}")]
    InvalidSpec(#[from] SpecError),

    #[error("travel matrix entry ({from}, {to}) is missing or negative")]
    MatrixIncomplete { from: usize, to: usize },

    #[error("solve was cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_error_converts() {
        let err: SolveError = SpecError::NegativeDemand { node: 3, demand: -1 }.into();
        assert!(matches!(
            err,
            SolveError::InvalidSpec(SpecError::NegativeDemand { node: 3, .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = SolveError::MatrixIncomplete { from: 1, to: 2 };
        assert_eq!(
            err.to_string(),
            "travel matrix entry (1, 2) is missing or negative"
        );
        let err: SolveError = SpecError::LockedDepot { node: 0 }.into();
        assert_eq!(
            err.to_string(),
            "invalid problem spec: depot 0 cannot be locked to a vehicle"
        );
    }
}
