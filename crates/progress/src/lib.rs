//! Terminal progress rendering.
//!
//! Bar rendering, runtime estimation, and the tracker facade that ties
//! them to a [`pacer_core::ProcessState`] and an output sink.

#![warn(missing_docs)]

pub mod bar;
pub mod estimator;
pub mod sink;
pub mod tracker;

pub use bar::{BarRenderer, Fidelity};
pub use estimator::{format_clock, format_duration, Estimate, RuntimeEstimator};
pub use sink::{FrameSink, TerminalSink};
pub use tracker::{DisplayMode, Tracker, TrackerConfig, TrackerError};
