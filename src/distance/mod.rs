//! Travel cost and duration matrices.
//!
//! Provides dense asymmetric arc matrices where an infinite entry marks an
//! unreachable pair of locations.

mod matrix;
mod travel;

pub use matrix::ArcMatrix;
pub use travel::TravelMatrix;
