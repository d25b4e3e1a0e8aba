//! Route feasibility checking and cost evaluation.
//!
//! - [`Cursor`] — One-step load/time propagation shared by every caller
//! - [`RouteState`] — Prefix states for O(suffix) move evaluation
//! - [`RouteEvaluator`] — Full route evaluation with violation reporting

mod evaluator;
mod state;

pub use evaluator::{evaluate_solution, RouteEvaluator};
pub use state::{Cursor, RouteState};
