//! Route and visit types.

/// A single visit to a node within a route.
///
/// Tracks the node ID along with computed timing and load state.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    /// Node ID being visited.
    pub node_id: usize,
    /// Service start at this node (after any waiting).
    pub arrival_time: f64,
    /// Cumulative load after this visit.
    pub load_after: i64,
}

/// An ordered sequence of node visits assigned to a single vehicle.
///
/// A route starts and ends at the vehicle's depot (not stored in `visits`).
///
/// # Examples
///
/// ```
/// use vrptw_solver::models::{Route, Visit};
///
/// let mut route = Route::new(0);
/// route.push_visit(Visit {
///     node_id: 1,
///     arrival_time: 10.0,
///     load_after: 1,
/// });
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.vehicle_id(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    vehicle_id: usize,
    visits: Vec<Visit>,
    total_cost: f64,
    end_time: f64,
    total_load: i64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            visits: Vec::new(),
            total_cost: 0.0,
            end_time: 0.0,
            total_load: 0,
        }
    }

    /// Appends a visit to the end of this route.
    pub fn push_visit(&mut self, visit: Visit) {
        self.total_load = visit.load_after;
        self.visits.push(visit);
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the ordered sequence of visits.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Returns the number of node visits (excluding depot).
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` if this route has no visits.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Returns the node IDs in visit order.
    pub fn node_ids(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.node_id).collect()
    }

    /// Total arc cost including both depot legs (set by evaluator).
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Time the vehicle is back at the depot (set by evaluator).
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Total load served by this route.
    pub fn total_load(&self) -> i64 {
        self.total_load
    }

    /// Sets the total cost (used by evaluator).
    pub fn set_total_cost(&mut self, cost: f64) {
        self.total_cost = cost;
    }

    /// Sets the return time (used by evaluator).
    pub fn set_end_time(&mut self, t: f64) {
        self.end_time = t;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::new(0);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.vehicle_id(), 0);
        assert_eq!(r.total_cost(), 0.0);
        assert_eq!(r.total_load(), 0);
    }

    #[test]
    fn test_route_push_visit() {
        let mut r = Route::new(1);
        r.push_visit(Visit {
            node_id: 5,
            arrival_time: 10.0,
            load_after: 2,
        });
        r.push_visit(Visit {
            node_id: 3,
            arrival_time: 20.0,
            load_after: 3,
        });
        assert_eq!(r.len(), 2);
        assert_eq!(r.node_ids(), vec![5, 3]);
        assert_eq!(r.total_load(), 3);
    }
}
