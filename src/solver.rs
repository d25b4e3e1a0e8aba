//! Solve entry point: validation, construction, search and projection.

use std::cmp::Ordering;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::constructive::best_insertion;
use crate::error::SolveError;
use crate::evaluation::evaluate_solution;
use crate::local_search::{Budget, CancelFlag, LocalSearch, SearchOutcome};
use crate::models::{Problem, RoutingProblem};
use crate::result::SolveResult;

/// Validated problem plus search settings, ready to solve.
///
/// Validation happens once in [`Solver::new`]; [`Solver::solve`] can then be
/// called repeatedly and from several threads.
///
/// # Examples
///
/// ```
/// use vrptw_solver::models::ProblemSpec;
/// use vrptw_solver::{SearchConfig, Solver};
///
/// let dist = |i: usize, j: usize| (i as f64 - j as f64).abs();
/// let spec = ProblemSpec::from_fns(4, dist, dist, |_| (0.0, 100.0), |n| i32::from(n != 0)).unwrap();
/// let config = SearchConfig::new(2, 10, 100.0).with_compute_time_limit_ms(200);
///
/// let result = Solver::new(&spec, config).unwrap().solve().unwrap();
/// assert_eq!(result.routes.len(), 2);
/// assert!(result.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    problem: Problem,
    config: SearchConfig,
    cancel: Option<CancelFlag>,
}

impl Solver {
    /// Validates `spec` against `config` and materializes the problem.
    ///
    /// # Errors
    ///
    /// [`SolveError::InvalidSpec`] for structural problems and
    /// [`SolveError::MatrixIncomplete`] for NaN or negative matrix entries.
    pub fn new<P: RoutingProblem + ?Sized>(
        spec: &P,
        config: SearchConfig,
    ) -> Result<Self, SolveError> {
        let problem = Problem::new(spec, &config)?;
        Ok(Self {
            problem,
            config,
            cancel: None,
        })
    }

    /// Attaches a flag that aborts the solve with [`SolveError::Cancelled`].
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// The validated problem.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Search settings.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Solves and returns the routes.
    pub fn solve(&self) -> Result<SolveResult, SolveError> {
        self.solve_detailed().map(|(result, _)| result)
    }

    /// Solves and returns the routes together with the winning search run.
    ///
    /// With several starts, the winner is the run with the fewest unrouted
    /// nodes, then the lowest cost, then the lexicographically smallest
    /// route-length vector, then the lowest start index. A run that drops a
    /// node never beats one that serves it, even at a lower cost.
    pub fn solve_detailed(&self) -> Result<(SolveResult, SearchOutcome), SolveError> {
        let started = Instant::now();
        let mut budget = Budget::new(started, self.config.compute_time_limit());
        if let Some(cancel) = &self.cancel {
            budget = budget.with_cancel(cancel.clone());
        }

        let num_starts = self.config.num_starts();
        info!(
            nodes = self.problem.num_nodes(),
            vehicles = self.problem.num_vehicles(),
            starts = num_starts,
            limit_ms = self.config.compute_time_limit().as_millis() as u64,
            "solve started"
        );

        let outcomes: Vec<SearchOutcome> = if num_starts == 1 {
            vec![self.run_start(0, &budget)?]
        } else {
            (0..num_starts)
                .into_par_iter()
                .map(|k| self.run_start(k, &budget))
                .collect::<Result<_, _>>()?
        };

        // num_starts() is at least 1, so the fallback is never taken.
        let (best, outcome) = outcomes
            .into_iter()
            .enumerate()
            .min_by(|(ka, a), (kb, b)| compare_outcomes(a, b).then(ka.cmp(kb)))
            .ok_or(SolveError::Cancelled)?;

        let (_, violations) = evaluate_solution(&self.problem, &outcome.solution);
        for violation in &violations {
            warn!(?violation, "winning solution breaks a constraint");
        }

        let result = SolveResult::from(&outcome.solution);
        info!(
            start = best,
            cost = result.total_cost,
            served = result.num_served(),
            unrouted = result.unrouted.len(),
            state = ?outcome.state,
            elapsed = ?started.elapsed(),
            "solve finished"
        );
        Ok((result, outcome))
    }

    fn run_start(&self, k: usize, budget: &Budget) -> Result<SearchOutcome, SolveError> {
        let seed = self.config.seed().wrapping_add(k as u64);
        let initial = best_insertion(&self.problem, seed);
        let outcome = LocalSearch::new(&self.problem, &initial).run(budget)?;
        debug!(
            start = k,
            seed,
            construction_cost = initial.total_cost(),
            cost = outcome.solution.total_cost(),
            unrouted = outcome.solution.num_unrouted(),
            state = ?outcome.state,
            "start finished"
        );
        Ok(outcome)
    }
}

/// Validates and solves in one call.
///
/// # Errors
///
/// See [`Solver::new`].
pub fn solve<P: RoutingProblem + ?Sized>(
    spec: &P,
    config: SearchConfig,
) -> Result<SolveResult, SolveError> {
    Solver::new(spec, config)?.solve()
}

/// Fewer unrouted nodes first, then lower cost, then the lexicographically
/// smaller route-length vector. Callers break remaining ties on start index.
fn compare_outcomes(a: &SearchOutcome, b: &SearchOutcome) -> Ordering {
    let (a, b) = (&a.solution, &b.solution);
    a.num_unrouted()
        .cmp(&b.num_unrouted())
        .then_with(|| a.total_cost().total_cmp(&b.total_cost()))
        .then_with(|| a.route_lengths().cmp(&b.route_lengths()))
}
