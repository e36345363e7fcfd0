//! Tracker facade.
//!
//! Ties one [`ProcessState`], one [`BarRenderer`], and one
//! [`RuntimeEstimator`] together, formats a render frame for the
//! configured display mode, and emits it to the output sink on
//! construction and after every advance.

use std::rc::Rc;

use pacer_core::{Clock, ConfigError, ProcessState, StateError};
use serde::{Deserialize, Serialize};

use crate::bar::{BarRenderer, Fidelity};
use crate::estimator::{format_clock, format_duration, RuntimeEstimator};
use crate::sink::FrameSink;

/// What a render frame contains.
///
/// Fixed at construction; not a runtime-transition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Percentage and bar only.
    Simple,
    /// Label, percentage, bar, and the step ratio.
    Regular,
    /// Regular plus begin/finish/pace statistics.
    Advanced,
}

/// Tracker construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Display label. Required (an empty string is fine); only shown in
    /// Regular and Advanced modes.
    pub label: Option<String>,
    /// Total steps of the tracked operation.
    pub total_steps: i64,
    /// Width of the bar body in blocks.
    pub block_count: i64,
    /// Frame layout.
    pub mode: DisplayMode,
    /// Bar rendering resolution.
    pub fidelity: Fidelity,
}

/// Anything a tracker operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Invalid construction arguments.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Protocol violation at call time.
    #[error(transparent)]
    State(#[from] StateError),

    /// The output sink rejected a write.
    #[error("failed to write to output sink: {0}")]
    Sink(#[from] std::io::Error),
}

/// Facade over state, bar, and estimator.
///
/// Owns the output line from construction until [`Tracker::close`];
/// other writes to the same sink during that window corrupt the display.
/// Single-threaded by design: `advance` mutates, notifies, re-renders,
/// and writes before returning.
pub struct Tracker<S: FrameSink> {
    state: ProcessState,
    bar: BarRenderer,
    estimator: RuntimeEstimator,
    mode: DisplayMode,
    label: String,
    sink: S,
    closed: bool,
}

impl<S: FrameSink> Tracker<S> {
    /// Build a tracker and immediately draw the zero frame.
    pub fn new(config: TrackerConfig, sink: S, clock: Rc<dyn Clock>) -> Result<Self, TrackerError> {
        let label = config.label.ok_or(ConfigError::MissingLabel)?;
        let mut state = ProcessState::new(config.total_steps)?;
        let bar = BarRenderer::new(config.block_count, state.total_steps(), config.fidelity)?;
        // The estimator must attach while the registration window is
        // still open.
        let estimator = RuntimeEstimator::start(&mut state, clock)?;

        let mut tracker = Self {
            state,
            bar,
            estimator,
            mode: config.mode,
            label,
            sink,
            closed: false,
        };
        tracker.redraw()?;
        Ok(tracker)
    }

    /// Advance the tracked operation by `steps` and redraw.
    ///
    /// State errors propagate unchanged; nothing is drawn on failure.
    pub fn advance(&mut self, steps: i64) -> Result<(), TrackerError> {
        if self.closed {
            return Err(StateError::Closed.into());
        }
        self.state.advance(steps)?;
        self.redraw()
    }

    /// Steps completed so far.
    pub fn current_step(&self) -> u64 {
        self.state.current_step()
    }

    /// Release the output line with a trailing newline.
    ///
    /// Terminal: no further advances are accepted. Calling close again
    /// is a no-op.
    pub fn close(&mut self) -> Result<(), TrackerError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.sink.finish()?;
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), TrackerError> {
        let frame = self.render_frame();
        tracing::debug!(frame = %frame, "drawing frame");
        self.sink.draw(&frame)?;
        Ok(())
    }

    fn render_frame(&self) -> String {
        let view = self.state.view();
        let percent = (view.current as f64 / view.total as f64 * 100.0).round() as u64;
        let bar = self.bar.render(view.current);

        match self.mode {
            DisplayMode::Simple => format!("{:>3}% {}", percent, bar),
            DisplayMode::Regular => format!(
                "{}: {:>3}% {} [{}/{}]",
                self.label, percent, bar, view.current, view.total
            ),
            DisplayMode::Advanced => {
                let estimate = self.estimator.estimate();
                format!(
                    "{}: {:>3}% {} [{}/{}] [{}|{}|{}]",
                    self.label,
                    percent,
                    bar,
                    view.current,
                    view.total,
                    format_clock(Some(self.estimator.runtime_begin())),
                    format_clock(estimate.finish),
                    format_duration(estimate.average_per_step),
                )
            }
        }
    }
}

impl<S: FrameSink> Drop for Tracker<S> {
    /// The line is released on every exit path; sink errors cannot
    /// surface here and are dropped.
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            let _ = self.sink.finish();
        }
    }
}
