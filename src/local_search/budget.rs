//! Wall-clock deadline and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared flag a caller sets to abandon a running solve.
///
/// Cloning shares the same flag. The search polls it between moves.
///
/// # Examples
///
/// ```
/// use vrptw_solver::local_search::CancelFlag;
///
/// let flag = CancelFlag::new();
/// let handle = flag.clone();
/// handle.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a flag that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Why a budget check stopped the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// The deadline passed.
    Deadline,
    /// The caller cancelled.
    Cancelled,
}

/// Deadline plus optional cancellation flag, checked between moves.
#[derive(Debug, Clone)]
pub struct Budget {
    started: Instant,
    deadline: Instant,
    cancel: Option<CancelFlag>,
}

impl Budget {
    /// Budget ending `limit` after `started`.
    pub fn new(started: Instant, limit: Duration) -> Self {
        Self {
            started,
            deadline: started + limit,
            cancel: None,
        }
    }

    /// Attaches a cancellation flag.
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Returns the reason to stop, if any. Cancellation wins over the deadline.
    pub fn check(&self) -> Option<Stop> {
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            Some(Stop::Cancelled)
        } else if Instant::now() >= self.deadline {
            Some(Stop::Deadline)
        } else {
            None
        }
    }

    /// Time since the budget started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
