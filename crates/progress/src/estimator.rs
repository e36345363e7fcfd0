//! Runtime estimation.
//!
//! Subscribes to a [`ProcessState`] and derives pace statistics from
//! wall-clock elapsed time: average time per step, estimated remaining
//! time, and estimated finish time. A simple linear average, fully
//! recomputed on every advance.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use pacer_core::{Clock, ProcessState, StateError, StateView};

/// Pace statistics derived from elapsed time.
///
/// Every field is `None` until the first non-zero advance. `None` is the
/// explicit "not yet computed" sentinel; it is never conflated with a
/// zero duration or a real timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Estimate {
    /// Average wall-clock time per completed step.
    pub average_per_step: Option<Duration>,
    /// Estimated time until the operation finishes.
    pub remaining: Option<Duration>,
    /// Estimated wall-clock finish time.
    pub finish: Option<DateTime<Utc>>,
}

/// Derives an [`Estimate`] from a [`ProcessState`] and a [`Clock`].
pub struct RuntimeEstimator {
    begin: DateTime<Utc>,
    estimate: Rc<RefCell<Estimate>>,
}

impl RuntimeEstimator {
    /// Subscribe to `state` and start the runtime clock.
    ///
    /// Must be called while the state is still in its initial window;
    /// the recorded begin time is assumed to coincide with the start of
    /// the tracked operation.
    pub fn start(state: &mut ProcessState, clock: Rc<dyn Clock>) -> Result<Self, StateError> {
        if !state.registration_open() {
            return Err(StateError::RegistrationClosed(state.current_step()));
        }

        let begin = clock.now();
        let estimate = Rc::new(RefCell::new(Estimate::default()));

        let cell = Rc::clone(&estimate);
        state.subscribe(Box::new(move |view: StateView| {
            // Unreachable through advance (zero steps never notify),
            // but a zero divisor must not slip through.
            if view.current == 0 {
                return;
            }
            let now = clock.now();
            let average = (now - begin) / view.current as i32;
            let remaining = average * view.total.saturating_sub(view.current) as i32;
            *cell.borrow_mut() = Estimate {
                average_per_step: Some(average),
                remaining: Some(remaining),
                finish: Some(now + remaining),
            };
        }))?;

        Ok(Self { begin, estimate })
    }

    /// When the runtime clock started.
    pub fn runtime_begin(&self) -> DateTime<Utc> {
        self.begin
    }

    /// Current statistics, recomputed on every advance.
    pub fn estimate(&self) -> Estimate {
        *self.estimate.borrow()
    }
}

impl std::fmt::Debug for RuntimeEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeEstimator")
            .field("begin", &self.begin)
            .field("estimate", &self.estimate.borrow())
            .finish()
    }
}

/// Render a timestamp as `HH:MM`, or `--:--` when not yet computed.
pub fn format_clock(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(t) => t.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

/// Render a duration as `HH:MM:SS` (hours unbounded), or `--:--:--`
/// when not yet computed.
pub fn format_duration(duration: Option<Duration>) -> String {
    match duration {
        Some(d) => {
            let secs = d.num_seconds().max(0);
            format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
        }
        None => "--:--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pacer_core::ManualClock;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_unset_until_first_advance() {
        let mut state = ProcessState::new(100).unwrap();
        let clock = ManualClock::new(noon());
        let estimator = RuntimeEstimator::start(&mut state, Rc::new(clock)).unwrap();

        let estimate = estimator.estimate();
        assert_eq!(estimate.average_per_step, None);
        assert_eq!(estimate.remaining, None);
        assert_eq!(estimate.finish, None);

        state.advance(0).unwrap();
        assert_eq!(estimator.estimate(), Estimate::default());
    }

    #[test]
    fn test_linear_average_and_finish() {
        let mut state = ProcessState::new(100).unwrap();
        let clock = ManualClock::new(noon());
        let estimator = RuntimeEstimator::start(&mut state, Rc::new(clock.clone())).unwrap();

        clock.advance(Duration::seconds(10));
        state.advance(10).unwrap();

        let estimate = estimator.estimate();
        assert_eq!(estimate.average_per_step, Some(Duration::seconds(1)));
        assert_eq!(estimate.remaining, Some(Duration::seconds(90)));
        assert_eq!(estimate.finish, Some(noon() + Duration::seconds(100)));
        assert_eq!(estimator.runtime_begin(), noon());
    }

    #[test]
    fn test_recomputed_not_incremental() {
        let mut state = ProcessState::new(100).unwrap();
        let clock = ManualClock::new(noon());
        let estimator = RuntimeEstimator::start(&mut state, Rc::new(clock.clone())).unwrap();

        clock.advance(Duration::seconds(10));
        state.advance(10).unwrap();

        // The pace collapses once the bulk of the work lands quickly.
        clock.advance(Duration::seconds(2));
        state.advance(50).unwrap();

        let estimate = estimator.estimate();
        assert_eq!(estimate.average_per_step, Some(Duration::milliseconds(200)));
        assert_eq!(estimate.remaining, Some(Duration::seconds(8)));
    }

    #[test]
    fn test_start_requires_initial_window() {
        let mut state = ProcessState::new(10).unwrap();
        state.advance(1).unwrap();

        let clock = ManualClock::new(noon());
        let result = RuntimeEstimator::start(&mut state, Rc::new(clock));
        assert!(matches!(result, Err(StateError::RegistrationClosed(1))));
    }

    #[test]
    fn test_over_progress_has_zero_remaining() {
        let mut state = ProcessState::new(4).unwrap();
        let clock = ManualClock::new(noon());
        let estimator = RuntimeEstimator::start(&mut state, Rc::new(clock.clone())).unwrap();

        clock.advance(Duration::seconds(6));
        state.advance(6).unwrap();

        let estimate = estimator.estimate();
        assert_eq!(estimate.remaining, Some(Duration::zero()));
        assert_eq!(estimate.finish, Some(noon() + Duration::seconds(6)));
    }

    #[test]
    fn test_format_placeholders() {
        assert_eq!(format_clock(None), "--:--");
        assert_eq!(format_duration(None), "--:--:--");
    }

    #[test]
    fn test_format_values() {
        assert_eq!(format_clock(Some(noon())), "12:00");
        assert_eq!(
            format_duration(Some(Duration::seconds(26 * 3600 + 5 * 60 + 9))),
            "26:05:09"
        );
        assert_eq!(format_duration(Some(Duration::zero())), "00:00:00");
    }
}
