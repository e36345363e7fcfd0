//! Pacer core data model.
//!
//! This crate defines the step-counting state that the rendering layer
//! observes, the wall-clock capability it estimates against, and the
//! error kinds shared across the workspace.

#![warn(missing_docs)]

// Step counting and change notification
mod state;

// Wall-clock capability
mod clock;

// Shared error kinds
mod error;

// Re-exports
pub use state::{Observer, ProcessState, StateView};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, StateError};
