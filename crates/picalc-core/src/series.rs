//! Series accumulation and the convergence-based stopping rule.

use tracing::trace;

use crate::calculator::PiError;
use crate::constants::CHUDNOVSKY_M;
use crate::context::PrecisionContext;
use crate::decimal::Decimal;
use crate::term::{Term, TermGenerator};

/// Mutable state of one summation.
#[derive(Debug, Clone)]
pub struct SeriesState {
    /// Index of the last term folded into the sum (0 before the first).
    pub index: u64,
    /// `M + term(1) + ... + term(index)` at working precision.
    pub running_sum: Decimal,
    /// Fixed a-priori estimate copied from the context.
    pub estimated_total_terms: u64,
}

/// Outcome of one accumulation step.
#[derive(Debug, Clone)]
pub struct SeriesStep {
    /// Index of the term just added.
    pub index: u64,
    /// The term just added.
    pub term: Term,
    /// Whether `|term| < 10^-digits`; no further steps follow when true.
    pub converged: bool,
}

/// Drives the term index forward and keeps the running sum.
#[derive(Debug, Clone)]
pub struct SeriesAccumulator {
    context: PrecisionContext,
    generator: TermGenerator,
    state: SeriesState,
    converged: bool,
}

impl SeriesAccumulator {
    /// Start a summation at `running_sum = M`, `index = 1`.
    #[must_use]
    pub fn new(context: PrecisionContext) -> Self {
        let state = SeriesState {
            index: 0,
            running_sum: Decimal::from_integer(CHUDNOVSKY_M, context.working_precision()),
            estimated_total_terms: context.estimated_total_terms(),
        };
        Self {
            context,
            generator: TermGenerator::new(),
            state,
            converged: false,
        }
    }

    /// Add the next term. Returns `Ok(None)` once the series has converged.
    ///
    /// The term that satisfies the stopping rule is still added to the sum.
    pub fn step(&mut self) -> Result<Option<SeriesStep>, PiError> {
        if self.converged {
            return Ok(None);
        }
        let Some(exact) = self.generator.next() else {
            return Ok(None);
        };
        let term = exact.to_term(self.context.working_precision())?;
        self.state.running_sum += &term.value;
        self.state.index = term.index;
        self.converged = exact.is_below_power_of_ten(self.context.requested_digits());

        trace!(
            index = term.index,
            converged = self.converged,
            "Added series term"
        );

        Ok(Some(SeriesStep {
            index: term.index,
            term,
            converged: self.converged,
        }))
    }

    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    #[must_use]
    pub fn state(&self) -> &SeriesState {
        &self.state
    }

    #[must_use]
    pub fn context(&self) -> &PrecisionContext {
        &self.context
    }

    /// Release the context and final state.
    #[must_use]
    pub fn into_parts(self) -> (PrecisionContext, SeriesState) {
        (self.context, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(digits: i64) -> (SeriesAccumulator, Vec<SeriesStep>) {
        let mut acc = SeriesAccumulator::new(PrecisionContext::new(digits).unwrap());
        let mut steps = Vec::new();
        while let Some(step) = acc.step().unwrap() {
            steps.push(step);
        }
        (acc, steps)
    }

    #[test]
    fn starts_at_m() {
        let acc = SeriesAccumulator::new(PrecisionContext::new(5).unwrap());
        assert_eq!(acc.state().index, 0);
        assert_eq!(acc.state().running_sum, Decimal::from_integer(CHUDNOVSKY_M, 15));
        assert!(!acc.is_converged());
    }

    #[test]
    fn index_increases_by_one() {
        let (_, steps) = drain(100);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.index, i as u64 + 1);
        }
    }

    #[test]
    fn only_last_step_is_converged() {
        let (acc, steps) = drain(60);
        let (last, rest) = steps.split_last().unwrap();
        assert!(last.converged);
        assert!(rest.iter().all(|s| !s.converged));
        assert!(acc.is_converged());
    }

    #[test]
    fn triggering_term_is_included() {
        let ctx = PrecisionContext::new(14).unwrap();
        let scale = ctx.working_precision();
        let (acc, steps) = drain(14);
        let mut expected = Decimal::from_integer(CHUDNOVSKY_M, scale);
        for step in &steps {
            expected += &step.term.value;
        }
        assert_eq!(steps.len(), 2);
        assert_eq!(acc.state().running_sum, expected);
    }

    #[test]
    fn step_after_convergence_is_none() {
        let (mut acc, _) = drain(5);
        assert!(acc.step().unwrap().is_none());
        assert!(acc.step().unwrap().is_none());
    }

    #[test]
    fn convergence_bound_holds() {
        for digits in [1i64, 5, 13, 14, 15, 28, 29, 100, 250] {
            let (acc, steps) = drain(digits);
            let threshold = acc.context().convergence_threshold().clone();
            let last = steps.last().unwrap();
            assert!(last.term.value.abs() < threshold, "digits={digits}");
            if steps.len() > 1 {
                let before = &steps[steps.len() - 2];
                assert!(before.term.value.abs() >= threshold, "digits={digits}");
            }
        }
    }
}
