//! Step-counting state with change notification.
//!
//! A `ProcessState` counts how far a caller-driven operation has come.
//! Observers register during an initial window (before the first non-zero
//! advance) and are invoked synchronously, in registration order, after
//! every mutation.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, StateError};

/// Immutable snapshot of the counters, handed to observers.
///
/// Observers receive the post-advance snapshot instead of reading the
/// state object itself, so notification never aliases the mutable borrow
/// held by `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateView {
    /// Steps completed so far.
    pub current: u64,
    /// Total steps the operation consists of.
    pub total: u64,
}

/// A change observer.
pub type Observer = Box<dyn FnMut(StateView)>;

/// Monotonically advancing step counter for one tracked operation.
pub struct ProcessState {
    total: u64,
    current: u64,
    observers: Vec<Observer>,
}

impl ProcessState {
    /// Create a state for an operation of `total_steps` steps.
    ///
    /// The counter starts at zero and the registration window is open.
    pub fn new(total_steps: i64) -> Result<Self, ConfigError> {
        if total_steps <= 0 {
            return Err(ConfigError::NonPositiveTotal(total_steps));
        }
        Ok(Self {
            total: total_steps as u64,
            current: 0,
            observers: Vec::new(),
        })
    }

    /// Steps completed so far.
    pub fn current_step(&self) -> u64 {
        self.current
    }

    /// Total steps the operation consists of.
    pub fn total_steps(&self) -> u64 {
        self.total
    }

    /// Current counters as a snapshot.
    pub fn view(&self) -> StateView {
        StateView {
            current: self.current,
            total: self.total,
        }
    }

    /// Whether observers may still register.
    pub fn registration_open(&self) -> bool {
        self.current == 0
    }

    /// Register a change observer.
    ///
    /// Only valid while no non-zero advance has happened yet. Observers
    /// are notified in registration order.
    pub fn subscribe(&mut self, observer: Observer) -> Result<(), StateError> {
        if self.current != 0 {
            return Err(StateError::RegistrationClosed(self.current));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Advance the counter by `steps`.
    ///
    /// Negative steps are rejected. Zero steps is an explicit no-op: the
    /// counter does not change and no observer runs. Positive steps first
    /// mutate the counter, then notify every observer exactly once with
    /// the post-advance snapshot.
    ///
    /// The counter is not clamped to the total; advancing past it is
    /// allowed and left to the rendering layer to handle.
    pub fn advance(&mut self, steps: i64) -> Result<(), StateError> {
        if steps < 0 {
            return Err(StateError::NegativeAdvance(steps));
        }
        if steps == 0 {
            return Ok(());
        }

        self.current += steps as u64;
        tracing::trace!(current = self.current, total = self.total, "advanced");

        let view = self.view();
        for observer in &mut self.observers {
            observer(view);
        }
        Ok(())
    }
}

impl std::fmt::Debug for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessState")
            .field("current", &self.current)
            .field("total", &self.total)
            .field("observers", &self.observers.len())
            .finish()
    }
}
