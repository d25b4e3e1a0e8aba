//! Solution and violation types.

use super::Route;

/// A type of constraint violation in a route or solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Vehicle capacity exceeded at some prefix of the route.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: i64,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Arrival after the node's time window closes.
    TimeWindowViolated {
        /// Node ID where violation occurred.
        node_id: usize,
        /// Time the vehicle reached the node.
        arrival: f64,
        /// Time window latest bound.
        latest: f64,
    },
    /// Vehicle is back at the depot after its shift end.
    LateReturn {
        /// Route index.
        route_index: usize,
        /// Actual return time.
        end_time: f64,
        /// Latest allowed return.
        shift_end: f64,
    },
    /// Two consecutive stops joined by an infinite cost or duration arc.
    UnreachableArc {
        /// Arc origin.
        from: usize,
        /// Arc destination.
        to: usize,
    },
    /// A locked node sits in a route other than its vehicle's.
    LockViolated {
        /// Locked node.
        node_id: usize,
        /// Vehicle the node is locked to.
        required_vehicle: usize,
        /// Route the node was found in.
        route_index: usize,
    },
    /// A node appears more than once across the solution.
    DuplicateNode {
        /// Repeated node.
        node_id: usize,
    },
    /// A node is neither routed nor reported unrouted.
    MissingNode {
        /// Absent node.
        node_id: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete solution to a routing problem.
///
/// Holds one route per vehicle (possibly empty) and the nodes that could not
/// be placed in any route.
///
/// # Examples
///
/// ```
/// use vrptw_solver::models::{Solution, Route};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new(0));
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.num_unrouted(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    routes: Vec<Route>,
    unrouted: Vec<usize>,
    total_cost: f64,
    feasible: bool,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            unrouted: Vec::new(),
            total_cost: 0.0,
            feasible: true,
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a node as unrouted.
    pub fn add_unrouted(&mut self, node_id: usize) {
        self.unrouted.push(node_id);
    }

    /// Returns the routes in this solution, indexed by vehicle.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes (one per vehicle, used or not).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns the IDs of unrouted nodes.
    pub fn unrouted(&self) -> &[usize] {
        &self.unrouted
    }

    /// Returns the number of unrouted nodes.
    pub fn num_unrouted(&self) -> usize {
        self.unrouted.len()
    }

    /// Returns the total cost of this solution.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Sets the total cost.
    pub fn set_total_cost(&mut self, cost: f64) {
        self.total_cost = cost;
    }

    /// Whether every route satisfied every constraint when last evaluated.
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// Sets the feasibility flag.
    pub fn set_feasible(&mut self, feasible: bool) {
        self.feasible = feasible;
    }

    /// Total number of nodes served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Number of visits per route, in vehicle order.
    pub fn route_lengths(&self) -> Vec<usize> {
        self.routes.iter().map(|r| r.len()).collect()
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}
