//! Route evaluator that computes timing, load, and feasibility.

use super::Cursor;
use crate::models::{Problem, Route, Solution, Vehicle, Violation, ViolationType, Visit};

/// Evaluates routes by computing visit timing, cumulative load, total cost,
/// and checking constraints (capacity, time windows, return time,
/// unreachable arcs, locks).
///
/// # Examples
///
/// ```
/// use vrptw_solver::evaluation::RouteEvaluator;
/// use vrptw_solver::models::{Problem, ProblemSpec};
/// use vrptw_solver::SearchConfig;
///
/// let spec = ProblemSpec::from_fns(
///     3,
///     |i, j| (i as f64 - j as f64).abs(),
///     |i, j| 5.0 + (i as f64 - j as f64).abs(),
///     |_| (0.0, 100.0),
///     |n| if n == 0 { 0 } else { 1 },
/// )
/// .unwrap();
/// let problem = Problem::new(&spec, &SearchConfig::new(1, 2, 100.0)).unwrap();
///
/// let evaluator = RouteEvaluator::new(&problem, &problem.vehicles()[0]);
/// let (route, violations) = evaluator.build_route(&[1, 2]);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.total_cost(), 4.0);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    problem: &'a Problem,
    vehicle: &'a Vehicle,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for one vehicle of the problem.
    pub fn new(problem: &'a Problem, vehicle: &'a Vehicle) -> Self {
        Self { problem, vehicle }
    }

    /// Builds a route from a sequence of node IDs, computing timing and load.
    ///
    /// Returns the constructed route and every constraint violation found.
    /// Capacity is reported once, at the first prefix that exceeds it.
    pub fn build_route(&self, node_ids: &[usize]) -> (Route, Vec<Violation>) {
        let mut route = Route::new(self.vehicle.id());
        let mut violations = Vec::new();
        let mut cursor = Cursor::start(self.problem, self.vehicle);
        let mut capacity_reported = false;

        for &nid in node_ids {
            if let Err(kind) = cursor.advance(self.problem, self.vehicle, nid) {
                let is_capacity = matches!(kind, ViolationType::CapacityExceeded { .. });
                if !(is_capacity && capacity_reported) {
                    violations.push(Violation::new(kind));
                }
                capacity_reported |= is_capacity;
            }
            // A step can break more than one constraint; capacity is only
            // returned when nothing else failed first.
            if !capacity_reported && !self.vehicle.can_carry(cursor.load) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index: 0,
                    load: cursor.load,
                    capacity: self.vehicle.capacity(),
                }));
                capacity_reported = true;
            }
            route.push_visit(Visit {
                node_id: nid,
                arrival_time: cursor.time,
                load_after: cursor.load,
            });
        }

        match cursor.close(self.problem, self.vehicle) {
            Ok((cost, end_time)) => {
                route.set_total_cost(cost);
                route.set_end_time(end_time);
            }
            Err(kind) => {
                let travel = self.problem.travel();
                let depot = self.vehicle.depot_id();
                route.set_total_cost(cursor.cost + travel.cost(cursor.prev, depot));
                route.set_end_time(cursor.time + travel.duration(cursor.prev, depot));
                violations.push(Violation::new(kind));
            }
        }

        (route, violations)
    }

    /// Returns `true` if the sequence satisfies every constraint.
    pub fn is_feasible(&self, node_ids: &[usize]) -> bool {
        let mut cursor = Cursor::start(self.problem, self.vehicle);
        node_ids
            .iter()
            .all(|&nid| cursor.advance(self.problem, self.vehicle, nid).is_ok())
            && cursor.close(self.problem, self.vehicle).is_ok()
    }
}

/// Evaluates an entire solution, returning `(total_cost, violations)`.
///
/// Besides per-route constraints, checks that every non-depot node is either
/// routed exactly once or listed as unrouted.
pub fn evaluate_solution(problem: &Problem, solution: &Solution) -> (f64, Vec<Violation>) {
    let mut total_cost = 0.0;
    let mut all_violations = Vec::new();
    let mut seen = vec![0usize; problem.num_nodes()];

    for (idx, route) in solution.routes().iter().enumerate() {
        let node_ids = route.node_ids();
        for &nid in &node_ids {
            seen[nid] += 1;
        }
        let Some(vehicle) = problem.vehicles().get(route.vehicle_id()) else {
            continue;
        };
        let evaluator = RouteEvaluator::new(problem, vehicle);
        let (evaluated, mut violations) = evaluator.build_route(&node_ids);

        // Adjust route_index in violations
        for v in &mut violations {
            match &mut v.kind {
                ViolationType::CapacityExceeded { route_index, .. }
                | ViolationType::LateReturn { route_index, .. }
                | ViolationType::LockViolated { route_index, .. } => {
                    *route_index = idx;
                }
                _ => {}
            }
        }

        total_cost += evaluated.total_cost();
        all_violations.append(&mut violations);
    }

    for &nid in solution.unrouted() {
        seen[nid] += 1;
    }
    for nid in problem.customer_ids() {
        match seen[nid] {
            0 => all_violations.push(Violation::new(ViolationType::MissingNode { node_id: nid })),
            1 => {}
            _ => all_violations.push(Violation::new(ViolationType::DuplicateNode { node_id: nid })),
        }
    }

    (total_cost, all_violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::models::ProblemSpec;

    /// Depot 0 plus nodes on a line; durations equal distances.
    fn setup(capacity: i32, tw: impl Fn(usize) -> (f64, f64)) -> Problem {
        let spec = ProblemSpec::from_fns(
            4,
            |i, j| (i as f64 - j as f64).abs(),
            |i, j| (i as f64 - j as f64).abs(),
            tw,
            |n| [0, 10, 20, 15][n],
        )
        .expect("valid");
        let config = SearchConfig::new(2, capacity, 100.0).with_lock(1, vec![3]);
        Problem::new(&spec, &config).expect("valid")
    }

    #[test]
    fn test_build_route_empty() {
        let p = setup(50, |_| (0.0, 100.0));
        let eval = RouteEvaluator::new(&p, &p.vehicles()[0]);
        let (route, violations) = eval.build_route(&[]);
        assert!(route.is_empty());
        assert!(violations.is_empty());
        assert_eq!(route.total_cost(), 0.0);
    }

    #[test]
    fn test_build_route_single() {
        let p = setup(50, |_| (0.0, 100.0));
        let eval = RouteEvaluator::new(&p, &p.vehicles()[0]);
        let (route, violations) = eval.build_route(&[2]);
        assert_eq!(route.len(), 1);
        assert!(violations.is_empty());
        assert!((route.total_cost() - 4.0).abs() < 1e-10);
        assert_eq!(route.total_load(), 20);
        assert_eq!(route.end_time(), 4.0);
    }

    #[test]
    fn test_build_route_capacity_violated() {
        let p = setup(25, |_| (0.0, 100.0));
        let eval = RouteEvaluator::new(&p, &p.vehicles()[1]);
        // 10 + 20 + 15 = 45 > 25, reported once
        let (route, violations) = eval.build_route(&[1, 2, 3]);
        assert_eq!(route.len(), 3);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded {
                load: 30,
                capacity: 25,
                ..
            }
        ));
    }

    #[test]
    fn test_build_route_time_window_violated() {
        let p = setup(50, |n| if n == 2 { (0.0, 1.5) } else { (0.0, 100.0) });
        let eval = RouteEvaluator::new(&p, &p.vehicles()[0]);
        let (_, violations) = eval.build_route(&[2]);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::TimeWindowViolated { node_id: 2, .. }
        ));
    }

    #[test]
    fn test_build_route_waiting() {
        let p = setup(50, |n| if n == 1 { (20.0, 100.0) } else { (0.0, 100.0) });
        let eval = RouteEvaluator::new(&p, &p.vehicles()[0]);
        let (route, violations) = eval.build_route(&[1, 2]);
        assert!(violations.is_empty());
        // Reaches 1 at 1.0, waits until 20.0, reaches 2 at 21.0
        assert!((route.visits()[0].arrival_time - 20.0).abs() < 1e-10);
        assert!((route.visits()[1].arrival_time - 21.0).abs() < 1e-10);
        assert!((route.end_time() - 23.0).abs() < 1e-10);
    }

    #[test]
    fn test_build_route_lock_violated() {
        let p = setup(50, |_| (0.0, 100.0));
        let eval = RouteEvaluator::new(&p, &p.vehicles()[0]);
        let (_, violations) = eval.build_route(&[3]);
        assert!(matches!(
            violations[0].kind,
            ViolationType::LockViolated {
                node_id: 3,
                required_vehicle: 1,
                ..
            }
        ));
        assert!(!eval.is_feasible(&[3]));
    }

    #[test]
    fn test_is_feasible_matches_build_route() {
        let p = setup(30, |_| (0.0, 100.0));
        let eval = RouteEvaluator::new(&p, &p.vehicles()[0]);
        for seq in [vec![1], vec![1, 2], vec![2, 1], vec![1, 2, 3]] {
            let (_, violations) = eval.build_route(&seq);
            assert_eq!(eval.is_feasible(&seq), violations.is_empty(), "{seq:?}");
        }
    }

    #[test]
    fn test_evaluate_solution_coverage() {
        let p = setup(50, |_| (0.0, 100.0));
        let v0 = RouteEvaluator::new(&p, &p.vehicles()[0]);
        let v1 = RouteEvaluator::new(&p, &p.vehicles()[1]);

        let mut sol = Solution::new();
        sol.add_route(v0.build_route(&[1, 2]).0);
        sol.add_route(v1.build_route(&[3]).0);
        let (cost, violations) = evaluate_solution(&p, &sol);
        assert!(violations.is_empty());
        assert!((cost - 10.0).abs() < 1e-10);

        let mut sol = Solution::new();
        sol.add_route(v0.build_route(&[1, 1]).0);
        sol.add_route(v1.build_route(&[]).0);
        let (_, violations) = evaluate_solution(&p, &sol);
        let kinds: Vec<_> = violations.into_iter().map(|v| v.kind).collect();
        assert!(kinds.contains(&ViolationType::DuplicateNode { node_id: 1 }));
        assert!(kinds.contains(&ViolationType::MissingNode { node_id: 2 }));
        assert!(kinds.contains(&ViolationType::MissingNode { node_id: 3 }));
    }
}
