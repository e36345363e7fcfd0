//! Wall-clock capability.
//!
//! Estimation needs calendar time rather than a monotonic instant because
//! the estimated finish is displayed as a time of day. The trait keeps the
//! estimator deterministic under test.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

/// Source of the current wall-clock time.
pub trait Clock {
    /// Current calendar time.
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually-driven clock.
///
/// Handles are cheap clones sharing one instant; setting or advancing the
/// time through any handle is visible through all of them.
#[derive(Debug, Clone)]
pub struct ManualClock {
    instant: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            instant: Rc::new(Cell::new(start)),
        }
    }

    /// Move the clock to an absolute time.
    pub fn set(&self, to: DateTime<Utc>) {
        self.instant.set(to);
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, by: chrono::Duration) {
        self.instant.set(self.instant.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant.get()
    }
}
