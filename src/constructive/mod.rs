//! Constructive heuristics for building initial CVRPTW solutions.
//!
//! - [`best_insertion`] — Sequential best insertion with locked nodes first, O(n²·m·L)

mod best_insertion;

pub use best_insertion::best_insertion;
pub(crate) use best_insertion::to_solution;
