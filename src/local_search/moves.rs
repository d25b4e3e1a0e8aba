//! Move representation shared by the neighborhoods.

use super::budget::Stop;

/// Smallest cost decrease accepted as an improvement.
pub(crate) const IMPROVEMENT_EPS: f64 = 1e-9;

/// A local search move over route node sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Reverse `nodes[from..=to]` of one route.
    TwoOpt { route: usize, from: usize, to: usize },
    /// Remove the node at `from_pos` of `from_route` and insert it before
    /// `to_pos` of `to_route`. For a move within one route, `to_pos` indexes
    /// the route after the removal.
    Relocate {
        from_route: usize,
        from_pos: usize,
        to_route: usize,
        to_pos: usize,
    },
    /// Exchange the node at `pos_a` of `route_a` with the node at `pos_b`
    /// of `route_b`.
    Swap {
        route_a: usize,
        pos_a: usize,
        route_b: usize,
        pos_b: usize,
    },
}

impl Move {
    /// Applies the move to the node sequences.
    pub fn apply(&self, routes: &mut [Vec<usize>]) {
        match *self {
            Move::TwoOpt { route, from, to } => routes[route][from..=to].reverse(),
            Move::Relocate {
                from_route,
                from_pos,
                to_route,
                to_pos,
            } => {
                let node = routes[from_route].remove(from_pos);
                routes[to_route].insert(to_pos, node);
            }
            Move::Swap {
                route_a,
                pos_a,
                route_b,
                pos_b,
            } => {
                let a = routes[route_a][pos_a];
                routes[route_a][pos_a] = routes[route_b][pos_b];
                routes[route_b][pos_b] = a;
            }
        }
    }

    /// Routes whose sequence changes.
    pub fn affected_routes(&self) -> (usize, Option<usize>) {
        match *self {
            Move::TwoOpt { route, .. } => (route, None),
            Move::Relocate {
                from_route,
                to_route,
                ..
            } => (from_route, (to_route != from_route).then_some(to_route)),
            Move::Swap {
                route_a, route_b, ..
            } => (route_a, Some(route_b)),
        }
    }
}

/// Result of scanning one neighborhood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Scan {
    /// First feasible move with a cost decrease beyond [`IMPROVEMENT_EPS`].
    Improving { mv: Move, delta: f64 },
    /// Every candidate was examined; none improves.
    Exhausted,
    /// The budget stopped the scan between candidates.
    Stopped(Stop),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_two_opt() {
        let mut routes = vec![vec![1, 2, 3, 4]];
        Move::TwoOpt {
            route: 0,
            from: 1,
            to: 3,
        }
        .apply(&mut routes);
        assert_eq!(routes[0], vec![1, 4, 3, 2]);
    }

    #[test]
    fn test_apply_relocate_within_route() {
        let mut routes = vec![vec![1, 2, 3]];
        Move::Relocate {
            from_route: 0,
            from_pos: 0,
            to_route: 0,
            to_pos: 2,
        }
        .apply(&mut routes);
        assert_eq!(routes[0], vec![2, 3, 1]);
    }

    #[test]
    fn test_apply_relocate_between_routes() {
        let mut routes = vec![vec![1, 2], vec![]];
        let mv = Move::Relocate {
            from_route: 0,
            from_pos: 1,
            to_route: 1,
            to_pos: 0,
        };
        mv.apply(&mut routes);
        assert_eq!(routes, vec![vec![1], vec![2]]);
        assert_eq!(mv.affected_routes(), (0, Some(1)));
    }

    #[test]
    fn test_apply_swap() {
        let mut routes = vec![vec![1, 2], vec![3]];
        Move::Swap {
            route_a: 0,
            pos_a: 0,
            route_b: 1,
            pos_b: 0,
        }
        .apply(&mut routes);
        assert_eq!(routes, vec![vec![3, 2], vec![1]]);
    }
}
