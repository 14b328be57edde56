//! Progress events, the term-count estimator and cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::calculator::PiError;

/// One event of a [`PiComputation`](crate::iterator::PiComputation).
///
/// Every summed term produces an `InProgress` event; exactly one `Done`
/// follows the last of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// A term has been folded into the running sum.
    InProgress {
        /// Index of the term just added.
        index: u64,
        /// Advisory completion estimate in `[0, 1]`.
        fraction: f64,
    },
    /// The series converged and the result is formatted.
    Done {
        /// `requested_digits + 2` characters, e.g. `"3.14159"`.
        result: String,
    },
}

impl ProgressEvent {
    /// Completion fraction; always `1.0` for `Done`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        match self {
            Self::InProgress { fraction, .. } => *fraction,
            Self::Done { .. } => 1.0,
        }
    }

    /// The formatted result, present only on `Done`.
    #[must_use]
    pub fn result(&self) -> Option<&str> {
        match self {
            Self::InProgress { .. } => None,
            Self::Done { result } => Some(result),
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}

/// Maps a term index to a heuristic completion fraction.
///
/// Saturates at `1.0` when the series needs more terms than estimated;
/// convergence, not this fraction, decides when summation stops.
#[derive(Debug, Clone, Copy)]
pub struct ProgressEstimator {
    estimated_total_terms: u64,
}

impl ProgressEstimator {
    #[must_use]
    pub fn new(estimated_total_terms: u64) -> Self {
        Self {
            estimated_total_terms: estimated_total_terms.max(1),
        }
    }

    /// `min(index / estimated_total_terms, 1.0)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self, index: u64) -> f64 {
        (index as f64 / self.estimated_total_terms as f64).min(1.0)
    }

    #[must_use]
    pub fn estimated_total_terms(&self) -> u64 {
        self.estimated_total_terms
    }
}

/// Progress update forwarded from calculators to observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressUpdate {
    /// Requested digit count of the computation.
    pub digits: u32,
    /// Index of the last summed term (0 for the completion update).
    pub index: u64,
    /// Current progress as a fraction in [0.0, 1.0].
    pub fraction: f64,
    /// Whether this is the final update.
    pub done: bool,
}

impl ProgressUpdate {
    #[must_use]
    pub fn new(digits: u32, index: u64, fraction: f64) -> Self {
        Self {
            digits,
            index,
            fraction,
            done: false,
        }
    }

    /// Create a completion update.
    #[must_use]
    pub fn done(digits: u32) -> Self {
        Self {
            digits,
            index: 0,
            fraction: 1.0,
            done: true,
        }
    }
}

/// Cooperative cancellation token, checked between terms.
///
/// # Example
/// ```
/// use picalc_core::progress::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Check for cancellation, returning an error if cancelled.
    pub fn check_cancelled(&self) -> Result<(), PiError> {
        if self.is_cancelled() {
            Err(PiError::Cancelled)
        } else {
            Ok(())
        }
    }
}
