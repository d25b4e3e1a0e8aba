//! Local search improvement over a constructed solution.
//!
//! - [`LocalSearch`] — First-improvement driver with a deadline
//! - [`Move`] — 2-opt, relocate and swap moves
//! - [`Budget`] — Deadline and cancellation checks between moves
//!
//! Every neighborhood evaluates candidates through
//! [`RouteState`](crate::evaluation::RouteState), so a candidate is costed
//! only from the first changed position onward.

mod budget;
mod engine;
mod moves;
mod relocate;
mod swap;
mod two_opt;

pub use budget::{Budget, CancelFlag, Stop};
pub use engine::{LocalSearch, SearchOutcome, SearchState};
pub use moves::Move;
