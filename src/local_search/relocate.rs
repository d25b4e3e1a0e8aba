//! Relocate: move one node to another position, in the same route or another.
//!
//! # Algorithm
//!
//! For every node u at position p of route r, and every target position
//! q of every route t that u may be assigned to:
//!
//! - t == r: remove u and re-insert it at q of the shortened route. Only the
//!   suffix from `min(p, q)` is re-propagated.
//! - t != r: the shortened route r is evaluated once per node, then each
//!   insertion into t is evaluated with [`RouteState::evaluate_insertion`].
//!
//! Removing a node can break a route when durations are not metric, so the
//! shortened route is always checked too.
//!
//! # Complexity
//!
//! O(n²·L) per pass, where L is the longest route.
//!
//! # Reference
//!
//! Savelsbergh, M.W.P. (1992). "The Vehicle Routing Problem with Time Windows:
//! Minimizing Route Duration", *ORSA Journal on Computing* 4(2), 146-154.

use super::budget::Budget;
use super::moves::{Move, Scan, IMPROVEMENT_EPS};
use crate::evaluation::RouteState;
use crate::models::Problem;

/// Returns the first improving feasible relocation.
pub(crate) fn first_improving(problem: &Problem, states: &[RouteState], budget: &Budget) -> Scan {
    let vehicles = problem.vehicles();
    let mut moved = Vec::new();

    for (r, from) in states.iter().enumerate() {
        let nodes = from.nodes();
        for (p, &u) in nodes.iter().enumerate() {
            let demand = i64::from(problem.node(u).demand());
            // Route r without u, shared by every inter-route target.
            let removed = from.evaluate_suffix(problem, &vehicles[r], p, nodes[p + 1..].iter().copied());

            for (t, to) in states.iter().enumerate() {
                if !problem.allows(u, t) {
                    continue;
                }

                if t == r {
                    for q in 0..nodes.len() {
                        if q == p {
                            continue;
                        }
                        if let Some(stop) = budget.check() {
                            return Scan::Stopped(stop);
                        }
                        moved.clear();
                        moved.extend(nodes.iter().enumerate().filter(|&(k, _)| k != p).map(|(_, &n)| n));
                        moved.insert(q, u);
                        let start = p.min(q);
                        let Some(cost) = from.evaluate_suffix(
                            problem,
                            &vehicles[r],
                            start,
                            moved[start..].iter().copied(),
                        ) else {
                            continue;
                        };
                        let delta = cost - from.total_cost();
                        if delta < -IMPROVEMENT_EPS {
                            return Scan::Improving {
                                mv: Move::Relocate {
                                    from_route: r,
                                    from_pos: p,
                                    to_route: r,
                                    to_pos: q,
                                },
                                delta,
                            };
                        }
                    }
                    continue;
                }

                let Some(removed_cost) = removed else {
                    continue;
                };
                if !vehicles[t].can_carry(to.load() + demand) {
                    continue;
                }
                for q in 0..=to.len() {
                    if let Some(stop) = budget.check() {
                        return Scan::Stopped(stop);
                    }
                    let Some(inserted_cost) = to.evaluate_insertion(problem, &vehicles[t], q, u)
                    else {
                        continue;
                    };
                    let delta = (removed_cost - from.total_cost()) + (inserted_cost - to.total_cost());
                    if delta < -IMPROVEMENT_EPS {
                        return Scan::Improving {
                            mv: Move::Relocate {
                                from_route: r,
                                from_pos: p,
                                to_route: t,
                                to_pos: q,
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

    fn line(n: usize, config: &SearchConfig) -> Problem {
        let dist = |i: usize, j: usize| (i as f64 - j as f64).abs();
        let spec = ProblemSpec::from_fns(n, dist, dist, |_| (0.0, 100.0), |node| {
            if node == 0 {
                0
            } else {
                1
            }
        })
        .expect("valid");
        Problem::new(&spec, config).expect("valid")
    }

    fn open_budget() -> Budget {
        Budget::new(Instant::now(), Duration::from_secs(3600))
    }

    fn states(p: &Problem, routes: Vec<Vec<usize>>) -> Vec<RouteState> {
        routes
            .into_iter()
            .enumerate()
            .map(|(v, nodes)| RouteState::new(p, &p.vehicles()[v], nodes))
            .collect()
    }

    fn apply(states: &[RouteState], mv: Move) -> Vec<Vec<usize>> {
        let mut routes: Vec<Vec<usize>> = states.iter().map(|s| s.nodes().to_vec()).collect();
        mv.apply(&mut routes);
        routes
    }

    #[test]
    fn test_within_route() {
        let p = line(4, &SearchConfig::new(1, 10, 100.0));
        // 0 → 2 → 1 → 3 → 0 costs 2+1+2+3 = 8; sorted order costs 6
        let s = states(&p, vec![vec![2, 1, 3]]);
        match first_improving(&p, &s, &open_budget()) {
            Scan::Improving { mv, delta } => {
                let routes = apply(&s, mv);
                let after = RouteState::new(&p, &p.vehicles()[0], routes[0].clone());
                assert!((after.total_cost() - (8.0 + delta)).abs() < 1e-10);
                assert!(after.total_cost() < 8.0);
            }
            other => panic!("expected improvement, got {other:?}"),
        }
    }

    #[test]
    fn test_between_routes() {
        let p = line(4, &SearchConfig::new(2, 10, 100.0));
        // Serving node 1 separately costs 2 extra; folding it into route 1 is free.
        let s = states(&p, vec![vec![1], vec![2, 3]]);
        match first_improving(&p, &s, &open_budget()) {
            Scan::Improving { mv, delta } => {
                assert!((delta + 2.0).abs() < 1e-10);
                assert_eq!(apply(&s, mv), vec![vec![], vec![1, 2, 3]]);
            }
            other => panic!("expected improvement, got {other:?}"),
        }
    }

    #[test]
    fn test_capacity_blocks_transfer() {
        let p = line(4, &SearchConfig::new(2, 2, 100.0));
        let s = states(&p, vec![vec![1], vec![2, 3]]);
        assert_eq!(first_improving(&p, &s, &open_budget()), Scan::Exhausted);
    }

    #[test]
    fn test_lock_blocks_transfer() {
        let config = SearchConfig::new(2, 10, 100.0).with_lock(0, vec![1]);
        let p = line(4, &config);
        let s = states(&p, vec![vec![1], vec![2, 3]]);
        assert_eq!(first_improving(&p, &s, &open_budget()), Scan::Exhausted);
    }

    #[test]
    fn test_zero_budget_stops() {
        let p = line(4, &SearchConfig::new(1, 10, 100.0));
        let s = states(&p, vec![vec![2, 1, 3]]);
        let budget = Budget::new(Instant::now(), Duration::ZERO);
        assert!(matches!(first_improving(&p, &s, &budget), Scan::Stopped(_)));
    }
}
