//! Vehicle type with capacity and shift bounds.

/// A vehicle that services one route, starting and ending at the depot.
///
/// # Examples
///
/// ```
/// use vrptw_solver::models::Vehicle;
///
/// let v = Vehicle::new(0, 3).with_shift_end(28_800.0);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 3);
/// assert_eq!(v.shift_end(), 28_800.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
    depot_id: usize,
    shift_end: f64,
}

impl Vehicle {
    /// Creates a vehicle with the given ID and capacity.
    ///
    /// Default: depot 0, no bound on the return time.
    pub fn new(id: usize, capacity: i32) -> Self {
        Self {
            id,
            capacity,
            depot_id: 0,
            shift_end: f64::INFINITY,
        }
    }

    /// Sets the depot for this vehicle.
    pub fn with_depot(mut self, depot_id: usize) -> Self {
        self.depot_id = depot_id;
        self
    }

    /// Sets the latest time the vehicle may be back at the depot.
    pub fn with_shift_end(mut self, shift_end: f64) -> Self {
        self.shift_end = shift_end;
        self
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Depot location ID (start and end of route).
    pub fn depot_id(&self) -> usize {
        self.depot_id
    }

    /// Latest allowed return to the depot.
    pub fn shift_end(&self) -> f64 {
        self.shift_end
    }

    /// Whether `load` fits in the vehicle.
    pub fn can_carry(&self, load: i64) -> bool {
        load <= i64::from(self.capacity)
    }

    /// Whether a return at `time` is within the shift.
    pub fn returns_in_time(&self, time: f64) -> bool {
        time <= self.shift_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(0, 200);
        assert_eq!(v.id(), 0);
        assert_eq!(v.capacity(), 200);
        assert_eq!(v.depot_id(), 0);
        assert!(v.shift_end().is_infinite());
    }

    #[test]
    fn test_vehicle_builder() {
        let v = Vehicle::new(1, 100).with_depot(2).with_shift_end(480.0);
        assert_eq!(v.id(), 1);
        assert_eq!(v.capacity(), 100);
        assert_eq!(v.depot_id(), 2);
        assert_eq!(v.shift_end(), 480.0);
    }

    #[test]
    fn test_vehicle_limits() {
        let v = Vehicle::new(0, 2).with_shift_end(100.0);
        assert!(v.can_carry(2));
        assert!(!v.can_carry(3));
        assert!(v.returns_in_time(100.0));
        assert!(!v.returns_in_time(100.5));
    }
}
