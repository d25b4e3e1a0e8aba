//! Routing problem input and the validated problem model.

use tracing::debug;

use super::{Node, TimeWindow, Vehicle};
use crate::config::SearchConfig;
use crate::distance::TravelMatrix;
use crate::error::{SolveError, SpecError};

/// Caller-side description of a routing problem instance.
///
/// Accessors are queried once while the [`Problem`] is built, so they may
/// be backed by any lookup, including closures over an upstream table.
///
/// # Examples
///
/// ```
/// use vrptw_solver::models::RoutingProblem;
///
/// struct Line {
///     n: usize,
/// }
///
/// impl RoutingProblem for Line {
///     fn num_nodes(&self) -> usize { self.n }
///     fn cost(&self, from: usize, to: usize) -> f64 {
///         (from as f64 - to as f64).abs()
///     }
///     fn duration(&self, from: usize, to: usize) -> f64 {
///         300.0 + self.cost(from, to)
///     }
///     fn time_window(&self, _node: usize) -> (f64, f64) { (0.0, 28_800.0) }
///     fn demand(&self, node: usize) -> i32 { if node == 0 { 0 } else { 1 } }
/// }
///
/// let tm = Line { n: 4 }.travel_matrix().unwrap();
/// assert_eq!(tm.cost(3, 1), 2.0);
/// ```
pub trait RoutingProblem: Send + Sync {
    /// Number of nodes, depot included.
    fn num_nodes(&self) -> usize;

    /// Cost of arc `from → to`; infinity when no route exists.
    fn cost(&self, from: usize, to: usize) -> f64;

    /// Duration of arc `from → to`, service time included; infinity when no
    /// route exists.
    fn duration(&self, from: usize, to: usize) -> f64;

    /// Inclusive `(earliest, latest)` service window of a node.
    fn time_window(&self, node: usize) -> (f64, f64);

    /// Demand of a node.
    fn demand(&self, node: usize) -> i32;

    /// Reports inconsistent dimensions in the underlying data.
    fn check_dimensions(&self) -> Result<(), SpecError> {
        Ok(())
    }

    /// Materializes the cost and duration accessors into a matrix.
    fn travel_matrix(&self) -> Result<TravelMatrix, SolveError> {
        TravelMatrix::from_fns(
            self.num_nodes(),
            |i, j| self.cost(i, j),
            |i, j| self.duration(i, j),
        )
    }
}

/// Dense [`RoutingProblem`] backed by a travel matrix and per-node tables.
///
/// # Examples
///
/// ```
/// use vrptw_solver::models::{ProblemSpec, RoutingProblem};
///
/// let spec = ProblemSpec::from_fns(
///     3,
///     |_, _| 10.0,
///     |_, _| 60.0,
///     |_| (0.0, 3600.0),
///     |node| if node == 0 { 0 } else { 1 },
/// )
/// .unwrap();
/// assert_eq!(spec.num_nodes(), 3);
/// assert_eq!(spec.demand(2), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemSpec {
    travel: TravelMatrix,
    time_windows: Vec<(f64, f64)>,
    demands: Vec<i32>,
}

impl ProblemSpec {
    /// Creates a spec from prepared tables. Dimensions are checked when the
    /// [`Problem`] is built.
    pub fn new(travel: TravelMatrix, time_windows: Vec<(f64, f64)>, demands: Vec<i32>) -> Self {
        Self {
            travel,
            time_windows,
            demands,
        }
    }

    /// Creates a spec by sampling accessor callbacks over `num_nodes` nodes.
    pub fn from_fns<C, D, W, Q>(
        num_nodes: usize,
        cost: C,
        duration: D,
        time_window: W,
        demand: Q,
    ) -> Result<Self, SolveError>
    where
        C: Fn(usize, usize) -> f64,
        D: Fn(usize, usize) -> f64,
        W: Fn(usize) -> (f64, f64),
        Q: Fn(usize) -> i32,
    {
        let travel = TravelMatrix::from_fns(num_nodes, cost, duration)?;
        Ok(Self::new(
            travel,
            (0..num_nodes).map(time_window).collect(),
            (0..num_nodes).map(demand).collect(),
        ))
    }
}

impl RoutingProblem for ProblemSpec {
    fn num_nodes(&self) -> usize {
        self.travel.size()
    }

    fn cost(&self, from: usize, to: usize) -> f64 {
        self.travel.cost(from, to)
    }

    fn duration(&self, from: usize, to: usize) -> f64 {
        self.travel.duration(from, to)
    }

    fn time_window(&self, node: usize) -> (f64, f64) {
        self.time_windows[node]
    }

    fn demand(&self, node: usize) -> i32 {
        self.demands[node]
    }

    fn check_dimensions(&self) -> Result<(), SpecError> {
        let n = self.num_nodes();
        if self.time_windows.len() != n {
            return Err(SpecError::DimensionMismatch {
                what: "time windows",
                expected: n,
                found: self.time_windows.len(),
            });
        }
        if self.demands.len() != n {
            return Err(SpecError::DimensionMismatch {
                what: "demands",
                expected: n,
                found: self.demands.len(),
            });
        }
        Ok(())
    }

    fn travel_matrix(&self) -> Result<TravelMatrix, SolveError> {
        Ok(self.travel.clone())
    }
}

/// Validated, immutable problem model shared by every solver component.
///
/// Built once per solve call from a [`RoutingProblem`] and a
/// [`SearchConfig`]; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Problem {
    nodes: Vec<Node>,
    travel: TravelMatrix,
    vehicles: Vec<Vehicle>,
    depot: usize,
    lock_owner: Vec<Option<usize>>,
    locks: Vec<Vec<usize>>,
}

impl Problem {
    /// Validates the input and builds the problem model.
    ///
    /// Fails fast on structural problems: dimension mismatches, negative
    /// demands or capacities, malformed time windows, bad locks and
    /// incomplete matrices.
    pub fn new<P: RoutingProblem + ?Sized>(
        spec: &P,
        config: &SearchConfig,
    ) -> Result<Self, SolveError> {
        spec.check_dimensions()?;
        let num_nodes = spec.num_nodes();
        let depot = config.depot();
        if depot >= num_nodes {
            return Err(SpecError::DepotOutOfRange { depot, num_nodes }.into());
        }
        let horizon = config.time_horizon();
        if !horizon.is_finite() || horizon < 0.0 {
            return Err(SpecError::NonFiniteHorizon(horizon).into());
        }

        let mut nodes = Vec::with_capacity(num_nodes);
        for id in 0..num_nodes {
            let demand = spec.demand(id);
            if demand < 0 {
                return Err(SpecError::NegativeDemand { node: id, demand }.into());
            }
            if id == depot && demand != 0 {
                return Err(SpecError::DepotDemand { depot, demand }.into());
            }
            let (earliest, latest) = spec.time_window(id);
            let tw = TimeWindow::new(earliest, latest).ok_or(SpecError::MalformedTimeWindow {
                node: id,
                earliest,
                latest,
            })?;
            nodes.push(Node::new(id, demand, tw));
        }

        let num_vehicles = config.num_vehicles();
        if let Some(caps) = config.vehicle_capacities() {
            if caps.len() != num_vehicles {
                return Err(SpecError::CapacityCountMismatch {
                    expected: num_vehicles,
                    found: caps.len(),
                }
                .into());
            }
        }
        let shift_end = nodes[depot].time_window().latest().min(horizon);
        let mut vehicles = Vec::with_capacity(num_vehicles);
        for id in 0..num_vehicles {
            let capacity = config.capacity_of(id);
            if capacity < 0 {
                return Err(SpecError::NegativeCapacity {
                    vehicle: id,
                    capacity,
                }
                .into());
            }
            vehicles.push(
                Vehicle::new(id, capacity)
                    .with_depot(depot)
                    .with_shift_end(shift_end),
            );
        }

        let mut lock_owner = vec![None; num_nodes];
        let mut locks = vec![Vec::new(); num_vehicles];
        for (vehicle, locked) in config.locks() {
            if let (true, Some(&node)) = (vehicle >= num_vehicles, locked.first()) {
                return Err(SpecError::LockOutOfRange { vehicle, node }.into());
            }
            for &node in locked {
                if node >= num_nodes {
                    return Err(SpecError::LockedNodeOutOfRange {
                        vehicle,
                        node,
                        num_nodes,
                    }
                    .into());
                }
                if node == depot {
                    return Err(SpecError::LockedDepot { node }.into());
                }
                match lock_owner[node] {
                    Some(first) if first != vehicle => {
                        return Err(SpecError::ConflictingLock {
                            node,
                            first,
                            second: vehicle,
                        }
                        .into());
                    }
                    Some(_) => {}
                    None => {
                        lock_owner[node] = Some(vehicle);
                        locks[vehicle].push(node);
                    }
                }
            }
        }

        let travel = spec.travel_matrix()?;
        if travel.size() != num_nodes {
            return Err(SpecError::DimensionMismatch {
                what: "travel matrix",
                expected: num_nodes,
                found: travel.size(),
            }
            .into());
        }

        debug!(num_nodes, num_vehicles, depot, shift_end, "problem model built");

        Ok(Self {
            nodes,
            travel,
            vehicles,
            depot,
            lock_owner,
            locks,
        })
    }

    /// Node with the given ID.
    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    /// Number of nodes, depot included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// IDs of every non-depot node, ascending.
    pub fn customer_ids(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(move |&id| id != self.depot)
    }

    /// Depot node ID.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Departure time from the depot.
    pub fn start_time(&self) -> f64 {
        self.nodes[self.depot].time_window().earliest()
    }

    /// Fleet, indexed by vehicle ID.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Travel matrix.
    pub fn travel(&self) -> &TravelMatrix {
        &self.travel
    }

    /// Vehicle a node is locked to, if any.
    pub fn lock_owner(&self, node: usize) -> Option<usize> {
        self.lock_owner[node]
    }

    /// Returns `true` if `node` may be served by `vehicle`.
    pub fn allows(&self, node: usize, vehicle: usize) -> bool {
        self.lock_owner[node].is_none_or(|owner| owner == vehicle)
    }

    /// Nodes locked to `vehicle`, in lock order.
    pub fn locks_of(&self, vehicle: usize) -> &[usize] {
        &self.locks[vehicle]
    }
}
