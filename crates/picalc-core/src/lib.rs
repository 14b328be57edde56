//! # picalc-core
//!
//! Core library for the PiCalc-rs pi calculator.
//! Evaluates the Chudnovsky series at an explicit, per-computation working
//! precision and exposes it as a lazy sequence of progress events.

pub mod calculator;
pub mod constants;
pub mod context;
pub mod decimal;
pub mod format;
pub mod iterator;
pub mod observer;
pub mod observers;
pub mod options;
pub mod progress;
pub mod series;
pub mod term;

// Re-exports
pub use calculator::{Calculator, ChudnovskyCalculator, PiError};
pub use constants::{exit_codes, GUARD_DIGITS, PROGRESS_REPORT_THRESHOLD};
pub use context::PrecisionContext;
pub use iterator::PiComputation;
pub use observer::{ProgressObserver, ProgressSubject};
pub use options::{DigitMode, Options};
pub use progress::{CancellationToken, ProgressEvent, ProgressUpdate};

/// Start a lazy computation of `digits` decimals of pi.
///
/// Fails before producing any event when `digits <= 0`.
///
/// # Example
/// ```
/// let mut events = picalc_core::compute_pi(14).unwrap();
/// let first = events.next().unwrap().unwrap();
/// assert_eq!(first.fraction(), 0.5);
/// ```
pub fn compute_pi(digits: i64) -> Result<PiComputation, PiError> {
    PiComputation::new(digits)
}

/// Compute `digits` decimals of pi eagerly.
///
/// # Example
/// ```
/// assert_eq!(picalc_core::pi(5).unwrap(), "3.14159");
/// assert!(picalc_core::pi(0).is_err());
/// ```
pub fn pi(digits: i64) -> Result<String, PiError> {
    for event in compute_pi(digits)? {
        if let ProgressEvent::Done { result } = event? {
            return Ok(result);
        }
    }
    Err(PiError::ArithmeticFailure(
        "series ended without a result".into(),
    ))
}
