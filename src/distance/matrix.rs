//! Dense arc matrix.

/// A dense n×n matrix of arc values stored in row-major order.
///
/// Entries may be `f64::INFINITY`, meaning no route exists between the two
/// locations. Rows and columns are not assumed symmetric.
///
/// # Examples
///
/// ```
/// use vrptw_solver::distance::ArcMatrix;
///
/// let m = ArcMatrix::from_rows(&[vec![0.0, 5.0], vec![f64::INFINITY, 0.0]]).unwrap();
/// assert_eq!(m.get(0, 1), 5.0);
/// assert!(m.is_reachable(0, 1));
/// assert!(!m.is_reachable(1, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArcMatrix {
    data: Vec<f64>,
    size: usize,
}

impl ArcMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from nested rows.
    ///
    /// Returns `None` if any row length differs from the number of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.concat(),
            size,
        })
    }

    /// Returns the value of arc `from → to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the value of arc `from → to`.
    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        self.data[from * self.size + to] = value;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if arc `from → to` has a finite value.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_finite()
    }

    /// Returns the first off-diagonal entry that is NaN or negative, in
    /// row-major order.
    ///
    /// Infinity is a valid "unreachable" marker and is not reported. The
    /// diagonal is never traversed, so its values are not checked.
    pub fn find_invalid(&self) -> Option<(usize, usize)> {
        self.data
            .iter()
            .enumerate()
            .map(|(idx, v)| (idx / self.size, idx % self.size, *v))
            .find(|&(from, to, v)| from != to && (v.is_nan() || v < 0.0))
            .map(|(from, to, _)| (from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let m = ArcMatrix::from_rows(&[vec![0.0, 1.0], vec![2.0, 0.0]]).expect("valid");
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(1, 0), 2.0);
        assert_eq!(m.size(), 2);
        assert!(ArcMatrix::from_rows(&[vec![0.0, 1.0], vec![2.0]]).is_none());
    }

    #[test]
    fn test_set_get() {
        let mut m = ArcMatrix::new(3);
        m.set(0, 1, 42.0);
        assert_eq!(m.get(0, 1), 42.0);
        assert_eq!(m.get(1, 0), 0.0);
    }

    #[test]
    fn test_unreachable() {
        let mut m = ArcMatrix::new(2);
        m.set(1, 0, f64::INFINITY);
        assert!(m.is_reachable(0, 1));
        assert!(!m.is_reachable(1, 0));
        assert!(m.find_invalid().is_none());
    }

    #[test]
    fn test_find_invalid() {
        let mut m = ArcMatrix::new(3);
        m.set(2, 1, f64::NAN);
        assert_eq!(m.find_invalid(), Some((2, 1)));
        m.set(0, 2, -1.0);
        assert_eq!(m.find_invalid(), Some((0, 2)));
    }

    #[test]
    fn test_diagonal_ignored() {
        let mut m = ArcMatrix::new(3);
        m.set(0, 0, f64::NAN);
        m.set(2, 2, -5.0);
        assert!(m.find_invalid().is_none());
        m.set(1, 2, -1.0);
        assert_eq!(m.find_invalid(), Some((1, 2)));
    }
}
