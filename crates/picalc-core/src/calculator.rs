//! Calculator trait and the Chudnovsky calculator.
//!
//! `Calculator` is the seam consumed by orchestration. `ChudnovskyCalculator`
//! drains a [`PiComputation`], checking cancellation between terms and
//! forwarding every event to a [`ProgressObserver`].

use tracing::debug;

use crate::iterator::PiComputation;
use crate::observer::ProgressObserver;
use crate::options::Options;
use crate::progress::{CancellationToken, ProgressEvent, ProgressUpdate};

/// Error type for pi calculations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PiError {
    /// The requested digit count is not a positive, representable integer.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The computation cannot produce a defined value.
    #[error("arithmetic failure: {0}")]
    ArithmeticFailure(String),

    /// Calculation was cancelled by its driver.
    #[error("calculation cancelled")]
    Cancelled,

    /// Calculation exceeded its driver's time budget.
    #[error("calculation timed out after {0}")]
    Timeout(String),
}

/// Public trait for pi calculators, consumed by orchestration.
pub trait Calculator: Send + Sync {
    /// Compute `digits` decimals of pi, reporting progress to `observer`.
    fn calculate(
        &self,
        cancel: &CancellationToken,
        observer: &dyn ProgressObserver,
        digits: i64,
        opts: &Options,
    ) -> Result<String, PiError>;

    /// Get the name of this calculator.
    fn name(&self) -> &str;
}

/// Drains the Chudnovsky series engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChudnovskyCalculator;

impl ChudnovskyCalculator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Calculator for ChudnovskyCalculator {
    fn calculate(
        &self,
        cancel: &CancellationToken,
        observer: &dyn ProgressObserver,
        digits: i64,
        opts: &Options,
    ) -> Result<String, PiError> {
        let mut computation = PiComputation::with_options(digits, opts)?;
        let requested = computation.requested_digits();

        loop {
            cancel.check_cancelled()?;
            let Some(event) = computation.next() else {
                return Err(PiError::ArithmeticFailure(
                    "series ended without a result".into(),
                ));
            };
            match event? {
                ProgressEvent::InProgress { index, fraction } => {
                    observer.on_progress(&ProgressUpdate::new(requested, index, fraction));
                }
                ProgressEvent::Done { result } => {
                    debug!(digits = requested, "Pi computation complete");
                    observer.on_progress(&ProgressUpdate::done(requested));
                    return Ok(result);
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "Chudnovsky"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::observers::NoOpObserver;

    struct CountingObserver {
        updates: AtomicUsize,
        done: AtomicUsize,
    }

    impl ProgressObserver for CountingObserver {
        fn on_progress(&self, update: &ProgressUpdate) {
            self.updates.fetch_add(1, Ordering::Relaxed);
            if update.done {
                self.done.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    #[test]
    fn calculates_known_digits() {
        let calc = ChudnovskyCalculator::new();
        let result = calc
            .calculate(&CancellationToken::new(), &NoOpObserver::new(), 5, &Options::default())
            .unwrap();
        assert_eq!(result, "3.14159");
    }

    #[test]
    fn forwards_every_event() {
        let observer = CountingObserver {
            updates: AtomicUsize::new(0),
            done: AtomicUsize::new(0),
        };
        ChudnovskyCalculator::new()
            .calculate(&CancellationToken::new(), &observer, 14, &Options::default())
            .unwrap();
        // Two terms plus the completion update.
        assert_eq!(observer.updates.load(Ordering::Relaxed), 3);
        assert_eq!(observer.done.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = ChudnovskyCalculator::new().calculate(
            &cancel,
            &NoOpObserver::new(),
            50,
            &Options::default(),
        );
        assert_eq!(result, Err(PiError::Cancelled));
    }

    #[test]
    fn invalid_digits_rejected() {
        let result = ChudnovskyCalculator::new().calculate(
            &CancellationToken::new(),
            &NoOpObserver::new(),
            0,
            &Options::default(),
        );
        assert!(matches!(result, Err(PiError::InvalidArgument(_))));
    }

    #[test]
    fn pi_error_display() {
        assert_eq!(PiError::Cancelled.to_string(), "calculation cancelled");
        assert_eq!(
            PiError::InvalidArgument("bad".into()).to_string(),
            "invalid argument: bad"
        );
    }

    #[test]
    fn calculator_name() {
        assert_eq!(ChudnovskyCalculator::new().name(), "Chudnovsky");
    }
}
