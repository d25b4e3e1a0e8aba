//! Inter-route swap: exchange one node between two routes.
//!
//! # Algorithm
//!
//! For every pair of routes (r, s) with r < s and every pair of positions
//! (p, q), exchange `r[p]` and `s[q]`. Both routes are re-propagated from
//! the swapped position, so time windows and unreachable arcs are caught.
//! Locks and capacity are checked before any propagation.
//!
//! # Complexity
//!
//! O(n²·L) per pass, where L is the longest route.
//!
//! # Reference
//!
//! Osman, I.H. (1993). "Metastrategy simulated annealing and tabu search
//! algorithms for the vehicle routing problem", *Annals of Operations
//! Research* 41, 421-451.

use std::iter::once;

use super::budget::Budget;
use super::moves::{Move, Scan, IMPROVEMENT_EPS};
use crate::evaluation::RouteState;
use crate::models::Problem;

/// Returns the first improving feasible swap between two routes.
pub(crate) fn first_improving(problem: &Problem, states: &[RouteState], budget: &Budget) -> Scan {
    let vehicles = problem.vehicles();

    for (r, route_a) in states.iter().enumerate() {
        for (s, route_b) in states.iter().enumerate().skip(r + 1) {
            let a = route_a.nodes();
            let b = route_b.nodes();
            for (p, &u) in a.iter().enumerate() {
                let du = i64::from(problem.node(u).demand());
                for (q, &w) in b.iter().enumerate() {
                    if let Some(stop) = budget.check() {
                        return Scan::Stopped(stop);
                    }
                    if !problem.allows(u, s) || !problem.allows(w, r) {
                        continue;
                    }
                    let dw = i64::from(problem.node(w).demand());
                    if !vehicles[r].can_carry(route_a.load() - du + dw)
                        || !vehicles[s].can_carry(route_b.load() - dw + du)
                    {
                        continue;
                    }

                    let tail_a = once(w).chain(a[p + 1..].iter().copied());
                    let Some(cost_a) = route_a.evaluate_suffix(problem, &vehicles[r], p, tail_a)
                    else {
                        continue;
                    };
                    let tail_b = once(u).chain(b[q + 1..].iter().copied());
                    let Some(cost_b) = route_b.evaluate_suffix(problem, &vehicles[s], q, tail_b)
                    else {
                        continue;
                    };

                    let delta =
                        (cost_a - route_a.total_cost()) + (cost_b - route_b.total_cost());
                    if delta < -IMPROVEMENT_EPS {
                        return Scan::Improving {
                            mv: Move::Swap {
                                route_a: r,
                                pos_a: p,
                                route_b: s,
                                pos_b: q,
                            },
                            delta,
                        };
                    }
                }
            }
        }
    }
    Scan::Exhausted
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::config::SearchConfig;
    use crate::models::ProblemSpec;

    /// Two clusters: nodes 1 and 2 near x = 10, nodes 3 and 4 near x = -10.
    fn clusters(config: &SearchConfig) -> Problem {
        let xs = [0.0, 10.0, 11.0, -10.0, -11.0];
        let dist = move |i: usize, j: usize| f64::abs(xs[i] - xs[j]);
        let spec =
            ProblemSpec::from_fns(5, dist, dist, |_| (0.0, 1000.0), |n| i32::from(n != 0))
                .expect("valid");
        Problem::new(&spec, config).expect("valid")
    }

    fn states(p: &Problem, routes: Vec<Vec<usize>>) -> Vec<RouteState> {
        routes
            .into_iter()
            .enumerate()
            .map(|(v, nodes)| RouteState::new(p, &p.vehicles()[v], nodes))
            .collect()
    }

    fn open_budget() -> Budget {
        Budget::new(Instant::now(), Duration::from_secs(3600))
    }

    #[test]
    fn test_swap_untangles_clusters() {
        let p = clusters(&SearchConfig::new(2, 2, 1000.0));
        // Each route visits both clusters: 0 → 1 → 3 → 0 costs 10+20+10 = 40.
        let s = states(&p, vec![vec![1, 3], vec![4, 2]]);
        match first_improving(&p, &s, &open_budget()) {
            Scan::Improving { mv, delta } => {
                let mut routes: Vec<Vec<usize>> = s.iter().map(|r| r.nodes().to_vec()).collect();
                mv.apply(&mut routes);
                let before: f64 = s.iter().map(RouteState::total_cost).sum();
                let after: f64 = routes
                    .into_iter()
                    .enumerate()
                    .map(|(v, nodes)| RouteState::new(&p, &p.vehicles()[v], nodes).total_cost())
                    .sum();
                assert!((after - (before + delta)).abs() < 1e-10);
                assert!(after < before);
            }
            other => panic!("expected improvement, got {other:?}"),
        }
    }

    #[test]
    fn test_lock_blocks_swap() {
        let config = SearchConfig::new(2, 2, 1000.0)
            .with_lock(0, vec![1, 3])
            .with_lock(1, vec![4, 2]);
        let p = clusters(&config);
        let s = states(&p, vec![vec![1, 3], vec![4, 2]]);
        assert_eq!(first_improving(&p, &s, &open_budget()), Scan::Exhausted);
    }

    #[test]
    fn test_single_route_has_no_swaps() {
        let p = clusters(&SearchConfig::new(1, 4, 1000.0));
        let s = states(&p, vec![vec![1, 3, 2, 4]]);
        assert_eq!(first_improving(&p, &s, &open_budget()), Scan::Exhausted);
    }
}
