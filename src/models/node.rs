//! Node and time window types.

use serde::{Deserialize, Serialize};

/// A time window constraint for service at a node.
///
/// The vehicle must arrive no later than `latest` and may arrive before
/// `earliest`, in which case it waits. Both bounds are inclusive and
/// measured in seconds from the start of the horizon.
///
/// # Examples
///
/// ```
/// use vrptw_solver::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert!(tw.earliest() <= tw.latest());
/// assert!(!tw.is_violated(150.0));
/// assert!(tw.is_violated(250.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    earliest: f64,
    latest: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest` or either value is non-finite.
    pub fn new(earliest: f64, latest: f64) -> Option<Self> {
        if !earliest.is_finite() || !latest.is_finite() || earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// Earliest service start.
    pub fn earliest(&self) -> f64 {
        self.earliest
    }

    /// Latest allowable arrival.
    pub fn latest(&self) -> f64 {
        self.latest
    }

    /// Service start when reaching the node at `ready`: waits until `earliest`.
    pub fn service_start(&self, ready: f64) -> f64 {
        ready.max(self.earliest)
    }

    /// Returns `true` if arriving at the given time violates this window.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.latest
    }
}

/// A location in a routing problem: either the depot or a customer visit.
///
/// # Examples
///
/// ```
/// use vrptw_solver::models::{Node, TimeWindow};
///
/// let tw = TimeWindow::new(0.0, 3600.0).unwrap();
/// let n = Node::new(4, 2, tw);
/// assert_eq!(n.id(), 4);
/// assert_eq!(n.demand(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: usize,
    demand: i32,
    time_window: TimeWindow,
}

impl Node {
    /// Creates a new node.
    pub fn new(id: usize, demand: i32, time_window: TimeWindow) -> Self {
        Self {
            id,
            demand,
            time_window,
        }
    }

    /// Node index in `[0, num_nodes)`.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Units loaded onto the vehicle when this node is visited.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Service time window.
    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_valid() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert_eq!(tw.earliest(), 10.0);
        assert_eq!(tw.latest(), 20.0);
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20.0, 10.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new(10.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_service_start_waits() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert_eq!(tw.service_start(5.0), 10.0);
        assert_eq!(tw.service_start(12.5), 12.5);
    }

    #[test]
    fn test_time_window_violated() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!(!tw.is_violated(10.0));
        assert!(!tw.is_violated(20.0));
        assert!(tw.is_violated(20.1));
    }

    #[test]
    fn test_node_accessors() {
        let tw = TimeWindow::new(0.0, 100.0).expect("valid");
        let n = Node::new(1, 5, tw);
        assert_eq!(n.id(), 1);
        assert_eq!(n.demand(), 5);
        assert_eq!(n.time_window().latest(), 100.0);
    }
}
