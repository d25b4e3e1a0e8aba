//! Intra-route 2-opt.
//!
//! # Algorithm
//!
//! For each pair of positions i < j in a route, reverse the segment
//! `[i..=j]`:
//!
//! ```text
//! before: prev - r[i] - r[i+1] - ... - r[j] - next
//! after:  prev - r[j] - r[j-1] - ... - r[i] - next
//! ```
//!
//! Arcs may be asymmetric, so the reversed segment's inner arcs change cost
//! too. Each candidate is therefore re-propagated from position `i` with
//! [`RouteState::evaluate_suffix`], which also enforces time windows.
//!
//! # Complexity
//!
//! O(n³) per pass for a route of n nodes.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::budget::Budget;
use super::moves::{Move, Scan, IMPROVEMENT_EPS};
use crate::evaluation::RouteState;
use crate::models::Problem;

/// Returns the first improving feasible 2-opt move, scanning routes in
/// vehicle order and positions in ascending order.
pub(crate) fn first_improving(problem: &Problem, states: &[RouteState], budget: &Budget) -> Scan {
    let mut tail = Vec::new();
    for (r, state) in states.iter().enumerate() {
        let n = state.len();
        if n < 2 {
            continue;
        }
        let vehicle = &problem.vehicles()[r];
        let nodes = state.nodes();
        for i in 0..n - 1 {
            for j in i + 1..n {
                if let Some(stop) = budget.check() {
                    return Scan::Stopped(stop);
                }
                tail.clear();
                tail.extend(nodes[i..=j].iter().rev());
                tail.extend_from_slice(&nodes[j + 1..]);
                let Some(cost) = state.evaluate_suffix(problem, vehicle, i, tail.iter().copied())
                else {
                    continue;
                };
                let delta = cost - state.total_cost();
                if delta < -IMPROVEMENT_EPS {
                    return Scan::Improving {
                        mv: Move::TwoOpt {
                            route: r,
                            from: i,
                            to: j,
                        },
                        delta,
                    };
                }
            }
        }
    }
    Scan::Exhausted
}
