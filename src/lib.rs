//! # vrptw-solver
//!
//! Capacitated vehicle routing with time windows: one depot, a fleet of
//! vehicles, per-node demands and time windows, optional vehicle locks and a
//! compute-time budget. Produces one ordered visit list per vehicle plus the
//! nodes no vehicle could serve.
//!
//! ## Modules
//!
//! - [`distance`] — Cost and duration matrices
//! - [`models`] — Domain model types (Node, Vehicle, Route, Solution, Problem)
//! - [`config`] — Search settings
//! - [`evaluation`] — Route feasibility checking and cost evaluation
//! - [`constructive`] — Best-insertion construction
//! - [`local_search`] — 2-opt, relocate and swap improvement under a deadline
//! - [`result`] — Caller-facing result
//! - [`solver`] — Validation, multi-start solve and winner selection
//!
//! ## Example
//!
//! ```
//! use vrptw_solver::models::ProblemSpec;
//! use vrptw_solver::{solve, SearchConfig};
//!
//! // Depot 0 and three nodes on a line, one unit of demand each.
//! let dist = |i: usize, j: usize| (i as f64 - j as f64).abs();
//! let spec = ProblemSpec::from_fns(4, dist, dist, |_| (0.0, 100.0), |n| i32::from(n != 0)).unwrap();
//!
//! let result = solve(&spec, SearchConfig::new(1, 10, 100.0)).unwrap();
//! assert_eq!(result.num_served(), 3);
//! assert!((result.total_cost - 6.0).abs() < 1e-10);
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod result;
pub mod solver;

pub use config::SearchConfig;
pub use error::{SolveError, SpecError};
pub use result::SolveResult;
pub use solver::{solve, Solver};
