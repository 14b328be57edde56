//! The lazy, pull-based pi computation.

use std::iter::FusedIterator;

use crate::calculator::PiError;
use crate::context::PrecisionContext;
use crate::format::ResultFormatter;
use crate::options::Options;
use crate::progress::{ProgressEstimator, ProgressEvent};
use crate::series::SeriesAccumulator;

#[derive(Debug)]
enum Phase {
    Summing(SeriesAccumulator),
    Converged(SeriesAccumulator),
    Exhausted,
}

/// Lazy sequence of progress events for one computation.
///
/// Yields one `InProgress` event per summed term, then a single `Done`
/// event carrying the result. Work happens only inside [`next`](Iterator::next);
/// dropping the iterator between events releases the computation. Once the
/// terminal event (or an error) has been returned, the iterator is exhausted.
///
/// # Example
/// ```
/// use picalc_core::iterator::PiComputation;
///
/// let events: Vec<_> = PiComputation::new(5).unwrap().collect::<Result<_, _>>().unwrap();
/// assert_eq!(events.last().unwrap().result(), Some("3.14159"));
/// ```
#[derive(Debug)]
pub struct PiComputation {
    phase: Phase,
    estimator: ProgressEstimator,
    formatter: ResultFormatter,
    requested_digits: u32,
}

impl PiComputation {
    /// Start a computation with default options.
    ///
    /// # Errors
    ///
    /// Returns [`PiError::InvalidArgument`] before any event when `digits <= 0`.
    pub fn new(digits: i64) -> Result<Self, PiError> {
        Self::with_options(digits, &Options::default())
    }

    /// Start a computation with explicit options.
    pub fn with_options(digits: i64, opts: &Options) -> Result<Self, PiError> {
        let context = PrecisionContext::new(digits)?;
        Ok(Self {
            estimator: ProgressEstimator::new(context.estimated_total_terms()),
            formatter: ResultFormatter::new(opts.digit_mode),
            requested_digits: context.requested_digits(),
            phase: Phase::Summing(SeriesAccumulator::new(context)),
        })
    }

    #[must_use]
    pub fn requested_digits(&self) -> u32 {
        self.requested_digits
    }

    #[must_use]
    pub fn estimated_total_terms(&self) -> u64 {
        self.estimator.estimated_total_terms()
    }

    /// Index of the last summed term, if the series is still held.
    #[must_use]
    pub fn terms_summed(&self) -> Option<u64> {
        match &self.phase {
            Phase::Summing(acc) | Phase::Converged(acc) => Some(acc.state().index),
            Phase::Exhausted => None,
        }
    }

    fn sum_next(&mut self, mut acc: SeriesAccumulator) -> Option<Result<ProgressEvent, PiError>> {
        match acc.step() {
            Ok(Some(step)) => {
                let event = ProgressEvent::InProgress {
                    index: step.index,
                    fraction: self.estimator.fraction(step.index),
                };
                self.phase = if step.converged {
                    Phase::Converged(acc)
                } else {
                    Phase::Summing(acc)
                };
                Some(Ok(event))
            }
            Ok(None) => self.finish(acc),
            Err(err) => Some(Err(err)),
        }
    }

    fn finish(&mut self, acc: SeriesAccumulator) -> Option<Result<ProgressEvent, PiError>> {
        let (context, state) = acc.into_parts();
        Some(
            self.formatter
                .format(&context, &state.running_sum)
                .map(|result| ProgressEvent::Done { result }),
        )
    }
}

impl Iterator for PiComputation {
    type Item = Result<ProgressEvent, PiError>;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.phase, Phase::Exhausted) {
            Phase::Summing(acc) => self.sum_next(acc),
            Phase::Converged(acc) => self.finish(acc),
            Phase::Exhausted => None,
        }
    }
}

impl FusedIterator for PiComputation {}
