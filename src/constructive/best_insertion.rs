//! Sequential best-insertion heuristic for CVRPTW.
//!
//! # Algorithm
//!
//! All vehicles start with an empty route. Nodes locked to a vehicle are
//! inserted first, in lock order, each at its cheapest feasible position in
//! its own vehicle. Then, repeatedly, the `(node, vehicle, position)` triple
//! with the lowest insertion delta among all feasible insertions is applied:
//!
//! delta(p, u, n) = c(p, u) + c(u, n) - c(p, n)
//!
//! where (p, n) is the arc being broken and u the node inserted. Ties go to
//! the lowest vehicle, then the lowest position, then the lowest node rank.
//! A node with no feasible insertion anywhere is left unrouted.
//!
//! # Complexity
//!
//! O(n² · m · L) where n = nodes, m = vehicles, L = route length.

use std::cmp::Ordering;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::evaluation::{RouteEvaluator, RouteState};
use crate::models::{Problem, Solution};

/// A candidate insertion, ordered by `(delta, vehicle, position, rank)`.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    pool_idx: usize,
    vehicle: usize,
    pos: usize,
    rank: usize,
    delta: f64,
}

impl Candidate {
    fn cmp_key(&self, other: &Candidate) -> Ordering {
        self.delta
            .total_cmp(&other.delta)
            .then(self.vehicle.cmp(&other.vehicle))
            .then(self.pos.cmp(&other.pos))
            .then(self.rank.cmp(&other.rank))
    }
}

/// Constructs an initial solution by sequential best insertion.
///
/// The `seed` only permutes node ranks used for the last tie-break; seed 0
/// ranks nodes by index. The returned solution has one route per vehicle
/// (possibly empty) and lists infeasible nodes as unrouted.
///
/// # Examples
///
/// ```
/// use vrptw_solver::constructive::best_insertion;
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
/// let problem = Problem::new(&spec, &SearchConfig::new(2, 3, 100.0)).unwrap();
///
/// let solution = best_insertion(&problem, 0);
/// assert_eq!(solution.num_routes(), 2);
/// assert_eq!(solution.num_served(), 3);
/// assert_eq!(solution.num_unrouted(), 0);
/// ```
pub fn best_insertion(problem: &Problem, seed: u64) -> Solution {
    let ranks = node_ranks(problem.num_nodes(), seed);
    let mut states: Vec<RouteState> = problem
        .vehicles()
        .iter()
        .map(|v| RouteState::new(problem, v, Vec::new()))
        .collect();
    let mut unrouted = Vec::new();

    for vehicle in problem.vehicles() {
        for &node in problem.locks_of(vehicle.id()) {
            let state = &states[vehicle.id()];
            match cheapest_position(problem, state, vehicle.id(), node) {
                Some((pos, _)) => insert(problem, &mut states, vehicle.id(), pos, node),
                None => {
                    warn!(node, vehicle = vehicle.id(), "locked node has no feasible position");
                    unrouted.push(node);
                }
            }
        }
    }

    let mut pool: Vec<usize> = problem
        .customer_ids()
        .filter(|&node| problem.lock_owner(node).is_none())
        .collect();

    while !pool.is_empty() {
        let mut best: Option<Candidate> = None;

        for (pool_idx, &node) in pool.iter().enumerate() {
            let demand = i64::from(problem.node(node).demand());
            for vehicle in problem.vehicles() {
                let state = &states[vehicle.id()];
                if !vehicle.can_carry(state.load() + demand) {
                    continue;
                }
                for pos in 0..=state.len() {
                    let delta = splice_delta(problem, state, vehicle.depot_id(), pos, node);
                    if !delta.is_finite() {
                        continue;
                    }
                    let candidate = Candidate {
                        pool_idx,
                        vehicle: vehicle.id(),
                        pos,
                        rank: ranks[node],
                        delta,
                    };
                    if best
                        .as_ref()
                        .is_some_and(|b| candidate.cmp_key(b) != Ordering::Less)
                    {
                        continue;
                    }
                    if state.evaluate_insertion(problem, vehicle, pos, node).is_some() {
                        best = Some(candidate);
                    }
                }
            }
        }

        match best {
            Some(c) => {
                let node = pool.remove(c.pool_idx);
                insert(problem, &mut states, c.vehicle, c.pos, node);
            }
            None => {
                // Nothing fits anywhere; the remaining nodes stay out.
                for &node in &pool {
                    warn!(node, "node has no feasible insertion in any vehicle");
                }
                unrouted.append(&mut pool);
            }
        }
    }

    let solution = to_solution(problem, &states, unrouted);
    debug!(
        served = solution.num_served(),
        unrouted = solution.num_unrouted(),
        cost = solution.total_cost(),
        seed,
        "construction finished"
    );
    solution
}

/// Cheapest feasible position for `node` in one route, lowest position on ties.
fn cheapest_position(
    problem: &Problem,
    state: &RouteState,
    vehicle: usize,
    node: usize,
) -> Option<(usize, f64)> {
    let v = &problem.vehicles()[vehicle];
    let mut best: Option<(usize, f64)> = None;
    for pos in 0..=state.len() {
        let delta = splice_delta(problem, state, v.depot_id(), pos, node);
        if !delta.is_finite() || best.is_some_and(|b| delta >= b.1) {
            continue;
        }
        if state.evaluate_insertion(problem, v, pos, node).is_some() {
            best = Some((pos, delta));
        }
    }
    best
}

/// Cost change of splicing `node` in before position `pos`.
fn splice_delta(problem: &Problem, state: &RouteState, depot: usize, pos: usize, node: usize) -> f64 {
    let travel = problem.travel();
    let nodes = state.nodes();
    let prev = if pos == 0 { depot } else { nodes[pos - 1] };
    let next = if pos == nodes.len() { depot } else { nodes[pos] };
    let removed = if prev == next { 0.0 } else { travel.cost(prev, next) };
    travel.cost(prev, node) + travel.cost(node, next) - removed
}

fn insert(problem: &Problem, states: &mut [RouteState], vehicle: usize, pos: usize, node: usize) {
    let mut nodes = states[vehicle].nodes().to_vec();
    nodes.insert(pos, node);
    states[vehicle] = RouteState::new(problem, &problem.vehicles()[vehicle], nodes);
}

/// Rank of each node for the final tie-break; identity for seed 0.
fn node_ranks(num_nodes: usize, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..num_nodes).collect();
    if seed != 0 {
        let mut rng = SmallRng::seed_from_u64(seed);
        order.shuffle(&mut rng);
    }
    let mut ranks = vec![0; num_nodes];
    for (rank, &node) in order.iter().enumerate() {
        ranks[node] = rank;
    }
    ranks
}

/// Projects route states into a [`Solution`] with one route per vehicle.
pub(crate) fn to_solution(problem: &Problem, states: &[RouteState], mut unrouted: Vec<usize>) -> Solution {
    let mut solution = Solution::new();
    let mut total_cost = 0.0;
    let mut feasible = true;
    for (vehicle, state) in problem.vehicles().iter().zip(states) {
        let evaluator = RouteEvaluator::new(problem, vehicle);
        let (route, violations) = evaluator.build_route(state.nodes());
        feasible &= violations.is_empty();
        total_cost += route.total_cost();
        solution.add_route(route);
    }
    unrouted.sort_unstable();
    for node in unrouted {
        solution.add_unrouted(node);
    }
    solution.set_total_cost(total_cost);
    solution.set_feasible(feasible);
    solution
}
