//! Domain model types for vehicle routing problems.
//!
//! Provides the core abstractions: nodes with demands and time windows,
//! vehicles with capacity and shift bounds, routes as ordered sequences of
//! visits, and the validated problem model that ties everything together.

mod node;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use node::{Node, TimeWindow};
pub use problem::{Problem, ProblemSpec, RoutingProblem};
pub use route::{Route, Visit};
pub use solution::{Solution, Violation, ViolationType};
pub use vehicle::Vehicle;
