//! Forward propagation of load and time along a route.
//!
//! [`Cursor`] is the single place where arrival times, loads and costs are
//! advanced from one stop to the next. [`RouteState`] stores the cursor at
//! every prefix of a route so that an edit starting at position `k` only
//! re-propagates the edited suffix.

use crate::models::{Problem, Vehicle, ViolationType};

/// Propagation state after some prefix of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Last location reached (the depot before the first visit).
    pub prev: usize,
    /// Cumulative load.
    pub load: i64,
    /// Cumulative arc cost.
    pub cost: f64,
    /// Departure time from `prev`.
    pub time: f64,
}

impl Cursor {
    /// Cursor at the depot before any visit.
    pub fn start(problem: &Problem, vehicle: &Vehicle) -> Self {
        Self {
            prev: vehicle.depot_id(),
            load: 0,
            cost: 0.0,
            time: problem.start_time(),
        }
    }

    /// Moves to `node`, updating load, cost and time.
    ///
    /// The cursor is always advanced, so a caller collecting every
    /// violation can keep going; the first constraint broken by this step
    /// is returned as the error. The route index of capacity violations is
    /// left at 0.
    pub fn advance(
        &mut self,
        problem: &Problem,
        vehicle: &Vehicle,
        node: usize,
    ) -> Result<(), ViolationType> {
        let travel = problem.travel();
        let from = self.prev;
        let traversable = travel.is_traversable(from, node);
        let ready = self.time + travel.duration(from, node);
        let target = problem.node(node);
        let tw = target.time_window();

        self.cost += travel.cost(from, node);
        self.load += i64::from(target.demand());
        self.time = tw.service_start(ready);
        self.prev = node;

        if let Some(required_vehicle) = problem.lock_owner(node) {
            if required_vehicle != vehicle.id() {
                return Err(ViolationType::LockViolated {
                    node_id: node,
                    required_vehicle,
                    route_index: vehicle.id(),
                });
            }
        }
        if !traversable {
            return Err(ViolationType::UnreachableArc { from, to: node });
        }
        if tw.is_violated(ready) {
            return Err(ViolationType::TimeWindowViolated {
                node_id: node,
                arrival: ready,
                latest: tw.latest(),
            });
        }
        if !vehicle.can_carry(self.load) {
            return Err(ViolationType::CapacityExceeded {
                route_index: 0,
                load: self.load,
                capacity: vehicle.capacity(),
            });
        }
        Ok(())
    }

    /// Returns to the depot, yielding `(total_cost, end_time)`.
    ///
    /// An empty route never leaves the depot and costs nothing.
    pub fn close(&self, problem: &Problem, vehicle: &Vehicle) -> Result<(f64, f64), ViolationType> {
        let depot = vehicle.depot_id();
        if self.prev == depot {
            return Ok((self.cost, self.time));
        }
        let travel = problem.travel();
        if !travel.is_traversable(self.prev, depot) {
            return Err(ViolationType::UnreachableArc {
                from: self.prev,
                to: depot,
            });
        }
        let cost = self.cost + travel.cost(self.prev, depot);
        let end_time = self.time + travel.duration(self.prev, depot);
        if !vehicle.returns_in_time(end_time) {
            return Err(ViolationType::LateReturn {
                route_index: 0,
                end_time,
                shift_end: vehicle.shift_end(),
            });
        }
        Ok((cost, end_time))
    }
}

/// Prefix states of one route.
///
/// `prefix(k)` is the cursor after the first `k` visits, so `prefix(0)` is
/// the depot at the start time.
///
/// # Examples
///
/// ```
/// use vrptw_solver::evaluation::RouteState;
/// use vrptw_solver::models::{Problem, ProblemSpec};
/// use vrptw_solver::SearchConfig;
///
/// let spec = ProblemSpec::from_fns(
///     4,
///     |i, j| (i as f64 - j as f64).abs(),
///     |i, j| (i as f64 - j as f64).abs(),
///     |_| (0.0, 100.0),
///     |n| if n == 0 { 0 } else { 1 },
/// )
/// .unwrap();
/// let problem = Problem::new(&spec, &SearchConfig::new(1, 3, 100.0)).unwrap();
/// let vehicle = &problem.vehicles()[0];
///
/// let state = RouteState::new(&problem, vehicle, vec![1, 3]);
/// assert!(state.is_feasible());
/// assert_eq!(state.total_cost(), 6.0);
///
/// // Insert node 2 between 1 and 3: only the suffix is re-propagated.
/// assert_eq!(state.evaluate_insertion(&problem, vehicle, 1, 2), Some(6.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteState {
    nodes: Vec<usize>,
    prefixes: Vec<Cursor>,
    total_cost: f64,
    end_time: f64,
    feasible: bool,
}

impl RouteState {
    /// Propagates a full route.
    pub fn new(problem: &Problem, vehicle: &Vehicle, nodes: Vec<usize>) -> Self {
        let mut cursor = Cursor::start(problem, vehicle);
        let mut prefixes = Vec::with_capacity(nodes.len() + 1);
        prefixes.push(cursor);
        let mut feasible = true;
        for &node in &nodes {
            feasible &= cursor.advance(problem, vehicle, node).is_ok();
            prefixes.push(cursor);
        }
        let (total_cost, end_time) = match cursor.close(problem, vehicle) {
            Ok(closed) => closed,
            Err(_) => {
                feasible = false;
                (f64::INFINITY, f64::INFINITY)
            }
        };
        Self {
            nodes,
            prefixes,
            total_cost: if feasible { total_cost } else { f64::INFINITY },
            end_time,
            feasible,
        }
    }

    /// Node sequence, depot excluded.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Number of visits.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the route has no visits.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Cursor after the first `k` visits.
    pub fn prefix(&self, k: usize) -> &Cursor {
        &self.prefixes[k]
    }

    /// Total cost, or infinity if the route is infeasible.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Return time to the depot.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Total load.
    pub fn load(&self) -> i64 {
        self.prefixes[self.nodes.len()].load
    }

    /// Whether every constraint holds.
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// Cost of `nodes[..start] ++ tail`, or `None` if that route breaks any
    /// constraint. Runs in O(|tail|).
    pub fn evaluate_suffix<I>(
        &self,
        problem: &Problem,
        vehicle: &Vehicle,
        start: usize,
        tail: I,
    ) -> Option<f64>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut cursor = self.prefixes[start];
        for node in tail {
            cursor.advance(problem, vehicle, node).ok()?;
        }
        cursor.close(problem, vehicle).ok().map(|(cost, _)| cost)
    }

    /// Cost after inserting `node` before position `pos`.
    pub fn evaluate_insertion(
        &self,
        problem: &Problem,
        vehicle: &Vehicle,
        pos: usize,
        node: usize,
    ) -> Option<f64> {
        let tail = std::iter::once(node).chain(self.nodes[pos..].iter().copied());
        self.evaluate_suffix(problem, vehicle, pos, tail)
    }
}
