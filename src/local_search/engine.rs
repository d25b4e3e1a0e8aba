//! First-improvement local search driver.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::budget::{Budget, Stop};
use super::moves::{Move, Scan};
use super::{relocate, swap, two_opt};
use crate::constructive::to_solution;
use crate::error::SolveError;
use crate::evaluation::RouteState;
use crate::models::{Problem, Solution};

/// Lifecycle of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    /// Still applying moves.
    Searching,
    /// A full pass over every neighborhood found no improving move.
    Converged,
    /// The deadline passed before convergence.
    TimeExpired,
}

/// What a finished search produced.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best solution found. Every accepted move lowers cost, so this is the
    /// last accepted state.
    pub solution: Solution,
    /// Terminal state, [`SearchState::Converged`] or [`SearchState::TimeExpired`].
    pub state: SearchState,
    /// Number of accepted moves.
    pub moves_applied: usize,
    /// Total cost after construction and after each accepted move.
    pub cost_trace: Vec<f64>,
    /// Wall time spent inside the budget, construction included.
    pub elapsed: Duration,
}

type Neighborhood = fn(&Problem, &[RouteState], &Budget) -> Scan;

/// Neighborhoods in the order they are scanned.
const NEIGHBORHOODS: [(&str, Neighborhood); 3] = [
    ("two_opt", two_opt::first_improving),
    ("relocate", relocate::first_improving),
    ("swap", swap::first_improving),
];

/// First-improvement descent over 2-opt, relocate and swap.
///
/// Each sweep scans the neighborhoods in order and applies the first move
/// that lowers total cost, then starts a new sweep. The budget is checked
/// before every candidate, so a deadline stops the search between moves
/// and never inside one.
///
/// Unrouted nodes stay unrouted: the neighborhoods only rearrange served
/// nodes.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use vrptw_solver::constructive::best_insertion;
/// use vrptw_solver::local_search::{Budget, LocalSearch, SearchState};
/// use vrptw_solver::models::{Problem, ProblemSpec};
/// use vrptw_solver::SearchConfig;
///
/// let dist = |i: usize, j: usize| (i as f64 - j as f64).abs();
/// let spec = ProblemSpec::from_fns(4, dist, dist, |_| (0.0, 100.0), |_| 0).unwrap();
/// let problem = Problem::new(&spec, &SearchConfig::new(1, 10, 100.0)).unwrap();
///
/// let initial = best_insertion(&problem, 0);
/// let budget = Budget::new(Instant::now(), Duration::from_secs(1));
/// let outcome = LocalSearch::new(&problem, &initial).run(&budget).unwrap();
/// assert_eq!(outcome.state, SearchState::Converged);
/// assert!((outcome.solution.total_cost() - 6.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearch<'a> {
    problem: &'a Problem,
    states: Vec<RouteState>,
    unrouted: Vec<usize>,
    cost: f64,
    state: SearchState,
    moves_applied: usize,
    cost_trace: Vec<f64>,
}

impl<'a> LocalSearch<'a> {
    /// Starts a search from `initial`, which must hold one route per vehicle.
    pub fn new(problem: &'a Problem, initial: &Solution) -> Self {
        let states: Vec<RouteState> = problem
            .vehicles()
            .iter()
            .enumerate()
            .map(|(v, vehicle)| {
                let nodes = initial
                    .routes()
                    .get(v)
                    .map(|route| route.node_ids())
                    .unwrap_or_default();
                RouteState::new(problem, vehicle, nodes)
            })
            .collect();
        let cost = states.iter().map(RouteState::total_cost).sum();
        Self {
            problem,
            states,
            unrouted: initial.unrouted().to_vec(),
            cost,
            state: SearchState::Searching,
            moves_applied: 0,
            cost_trace: vec![cost],
        }
    }

    /// Current state.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Current total cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Runs one sweep: applies at most one improving move.
    ///
    /// Returns the state after the sweep. Once the search is no longer
    /// [`SearchState::Searching`], further calls return immediately.
    pub fn step(&mut self, budget: &Budget) -> Result<SearchState, SolveError> {
        if self.state != SearchState::Searching {
            return Ok(self.state);
        }
        if let Some(stop) = budget.check() {
            return self.stop(stop);
        }
        for (name, scan) in NEIGHBORHOODS {
            match scan(self.problem, &self.states, budget) {
                Scan::Exhausted => continue,
                Scan::Stopped(stop) => return self.stop(stop),
                Scan::Improving { mv, delta } => {
                    self.apply(mv);
                    trace!(neighborhood = name, ?mv, delta, cost = self.cost, "move accepted");
                    return Ok(self.state);
                }
            }
        }
        self.state = SearchState::Converged;
        Ok(self.state)
    }

    /// Sweeps until convergence or the deadline.
    ///
    /// # Errors
    ///
    /// [`SolveError::Cancelled`] if the budget's cancel flag is raised.
    pub fn run(mut self, budget: &Budget) -> Result<SearchOutcome, SolveError> {
        let initial_cost = self.cost;
        while self.step(budget)? == SearchState::Searching {}

        let elapsed = budget.elapsed();
        info!(
            state = ?self.state,
            moves = self.moves_applied,
            initial_cost,
            cost = self.cost,
            ?elapsed,
            "local search finished"
        );
        Ok(SearchOutcome {
            solution: to_solution(self.problem, &self.states, self.unrouted),
            state: self.state,
            moves_applied: self.moves_applied,
            cost_trace: self.cost_trace,
            elapsed,
        })
    }

    fn stop(&mut self, stop: Stop) -> Result<SearchState, SolveError> {
        match stop {
            Stop::Deadline => {
                debug!(moves = self.moves_applied, "deadline reached");
                self.state = SearchState::TimeExpired;
                Ok(self.state)
            }
            Stop::Cancelled => Err(SolveError::Cancelled),
        }
    }

    fn apply(&mut self, mv: Move) {
        let mut routes: Vec<Vec<usize>> =
            self.states.iter().map(|s| s.nodes().to_vec()).collect();
        mv.apply(&mut routes);

        let (first, second) = mv.affected_routes();
        for r in std::iter::once(first).chain(second) {
            let nodes = std::mem::take(&mut routes[r]);
            self.states[r] = RouteState::new(self.problem, &self.problem.vehicles()[r], nodes);
        }
        self.cost = self.states.iter().map(RouteState::total_cost).sum();
        self.moves_applied += 1;
        self.cost_trace.push(self.cost);
    }
}
