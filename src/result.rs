//! Caller-facing solve result.

use serde::{Deserialize, Serialize};

use crate::models::Solution;

/// Routes of a finished solve, one per vehicle.
///
/// `routes[v]` is the visit order of vehicle `v`, depot excluded. Vehicles
/// with nothing to do keep an empty list, so `routes.len()` always equals the
/// configured number of vehicles.
///
/// # Examples
///
/// ```
/// use vrptw_solver::SolveResult;
///
/// let result = SolveResult::new(vec![vec![2, 1], vec![]], vec![3], 7.5);
/// assert_eq!(result.used_vehicles(), 1);
/// assert!(!result.is_complete());
/// assert_eq!(result.waypoints(0), vec![vec![0, 2, 1, 0]]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Node sequence per vehicle.
    pub routes: Vec<Vec<usize>>,
    /// Nodes no vehicle could serve, ascending.
    pub unrouted: Vec<usize>,
    /// Sum of arc costs over all routes.
    pub total_cost: f64,
}

impl SolveResult {
    /// Creates a result; `unrouted` is sorted.
    pub fn new(routes: Vec<Vec<usize>>, mut unrouted: Vec<usize>, total_cost: f64) -> Self {
        unrouted.sort_unstable();
        Self {
            routes,
            unrouted,
            total_cost,
        }
    }

    /// Number of served nodes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    /// Number of vehicles with at least one visit.
    pub fn used_vehicles(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Whether every node was served.
    pub fn is_complete(&self) -> bool {
        self.unrouted.is_empty()
    }

    /// `depot, route.., depot` for every non-empty route, in vehicle order.
    pub fn waypoints(&self, depot: usize) -> Vec<Vec<usize>> {
        self.routes
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| {
                let mut w = Vec::with_capacity(r.len() + 2);
                w.push(depot);
                w.extend_from_slice(r);
                w.push(depot);
                w
            })
            .collect()
    }
}

impl From<&Solution> for SolveResult {
    fn from(solution: &Solution) -> Self {
        Self::new(
            solution.routes().iter().map(|r| r.node_ids()).collect(),
            solution.unrouted().to_vec(),
            solution.total_cost(),
        )
    }
}
