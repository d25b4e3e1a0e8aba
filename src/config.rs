//! Search configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fleet and search parameters for one solve call.
///
/// Missing fields fall back to [`SearchConfig::default`] when deserializing,
/// so a JSON document only needs the values it changes.
///
/// # Examples
///
/// ```
/// use vrptw_solver::SearchConfig;
///
/// let config = SearchConfig::new(3, 3, 8.0 * 3600.0)
///     .with_compute_time_limit_ms(1000)
///     .with_depot(0)
///     .with_lock(1, vec![4, 2]);
/// assert_eq!(config.num_vehicles(), 3);
/// assert_eq!(config.capacity_of(2), 3);
/// assert_eq!(config.locks_of(1), &[4, 2]);
/// assert!(config.locks_of(0).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    compute_time_limit_ms: u64,
    num_vehicles: usize,
    depot: usize,
    time_horizon: f64,
    vehicle_capacity: i32,
    vehicle_capacities: Option<Vec<i32>>,
    locks: BTreeMap<usize, Vec<usize>>,
    num_starts: usize,
    seed: u64,
}

impl SearchConfig {
    /// Creates a configuration for a homogeneous fleet.
    pub fn new(num_vehicles: usize, vehicle_capacity: i32, time_horizon: f64) -> Self {
        Self {
            num_vehicles,
            vehicle_capacity,
            time_horizon,
            ..Self::default()
        }
    }

    /// Sets the wall-clock budget of a solve, in milliseconds.
    pub fn with_compute_time_limit_ms(mut self, ms: u64) -> Self {
        self.compute_time_limit_ms = ms;
        self
    }

    /// Sets the depot node.
    pub fn with_depot(mut self, depot: usize) -> Self {
        self.depot = depot;
        self
    }

    /// Gives each vehicle its own capacity, overriding the fleet-wide value.
    pub fn with_vehicle_capacities(mut self, capacities: Vec<i32>) -> Self {
        self.vehicle_capacities = Some(capacities);
        self
    }

    /// Locks `nodes` to `vehicle`. Replaces any earlier locks of that vehicle.
    pub fn with_lock(mut self, vehicle: usize, nodes: Vec<usize>) -> Self {
        self.locks.insert(vehicle, nodes);
        self
    }

    /// Number of independent construction + search runs. Values below 1 mean 1.
    pub fn with_num_starts(mut self, num_starts: usize) -> Self {
        self.num_starts = num_starts;
        self
    }

    /// Sets the tie-break seed of the first run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Local search budget.
    pub fn compute_time_limit(&self) -> Duration {
        Duration::from_millis(self.compute_time_limit_ms)
    }

    /// Number of vehicles in the fleet.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Depot node index.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// End of the planning horizon, in seconds from its start.
    pub fn time_horizon(&self) -> f64 {
        self.time_horizon
    }

    /// Fleet-wide capacity.
    pub fn vehicle_capacity(&self) -> i32 {
        self.vehicle_capacity
    }

    /// Per-vehicle capacities, if set.
    pub fn vehicle_capacities(&self) -> Option<&[i32]> {
        self.vehicle_capacities.as_deref()
    }

    /// Capacity of the given vehicle.
    pub fn capacity_of(&self, vehicle: usize) -> i32 {
        self.vehicle_capacities
            .as_ref()
            .and_then(|caps| caps.get(vehicle).copied())
            .unwrap_or(self.vehicle_capacity)
    }

    /// Nodes locked to `vehicle`, in the order given.
    pub fn locks_of(&self, vehicle: usize) -> &[usize] {
        self.locks.get(&vehicle).map_or(&[], Vec::as_slice)
    }

    /// Every `(vehicle, nodes)` lock entry, by ascending vehicle.
    pub fn locks(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.locks.iter().map(|(&v, nodes)| (v, nodes.as_slice()))
    }

    /// Number of runs, at least 1.
    pub fn num_starts(&self) -> usize {
        self.num_starts.max(1)
    }

    /// Tie-break seed of the first run.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            compute_time_limit_ms: 1000,
            num_vehicles: 1,
            depot: 0,
            time_horizon: 86_400.0,
            vehicle_capacity: i32::MAX,
            vehicle_capacities: None,
            locks: BTreeMap::new(),
            num_starts: 1,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SearchConfig::default();
        assert_eq!(c.compute_time_limit(), Duration::from_millis(1000));
        assert_eq!(c.num_vehicles(), 1);
        assert_eq!(c.depot(), 0);
        assert_eq!(c.num_starts(), 1);
        assert_eq!(c.seed(), 0);
        assert!(c.vehicle_capacities().is_none());
    }

    #[test]
    fn test_per_vehicle_capacity() {
        let c = SearchConfig::new(3, 5, 100.0).with_vehicle_capacities(vec![1, 2, 3]);
        assert_eq!(c.capacity_of(0), 1);
        assert_eq!(c.capacity_of(2), 3);
        assert_eq!(c.vehicle_capacity(), 5);
    }

    #[test]
    fn test_num_starts_floor() {
        let c = SearchConfig::default().with_num_starts(0);
        assert_eq!(c.num_starts(), 1);
    }

    #[test]
    fn test_locks_iteration_order() {
        let c = SearchConfig::new(3, 5, 100.0)
            .with_lock(2, vec![5])
            .with_lock(0, vec![1, 3]);
        let locks: Vec<_> = c.locks().collect();
        assert_eq!(locks, vec![(0, &[1, 3][..]), (2, &[5][..])]);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let c: SearchConfig = serde_json::from_str(
            r#"{"num_vehicles": 3, "vehicle_capacity": 3, "compute_time_limit_ms": 250,
                "locks": {"1": [4]}}"#,
        )
        .expect("valid json");
        assert_eq!(c.num_vehicles(), 3);
        assert_eq!(c.capacity_of(0), 3);
        assert_eq!(c.compute_time_limit(), Duration::from_millis(250));
        assert_eq!(c.locks_of(1), &[4]);
        assert_eq!(c.time_horizon(), 86_400.0);
    }
}
