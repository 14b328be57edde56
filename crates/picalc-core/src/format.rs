//! Final division and string formatting.
//!
//! In [`DigitMode::Truncate`] the rendered value is cut to
//! `requested_digits + 2` characters. This is character truncation, not
//! numeric rounding: for 10 digits the output is `3.1415926535` although the
//! correctly rounded value ends in `6`. [`DigitMode::Round`] is the opt-in
//! alternative.

use crate::calculator::PiError;
use crate::context::PrecisionContext;
use crate::decimal::Decimal;
use crate::options::DigitMode;

/// Turns the converged running sum into the output string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultFormatter {
    mode: DigitMode,
}

impl ResultFormatter {
    #[must_use]
    pub fn new(mode: DigitMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn mode(&self) -> DigitMode {
        self.mode
    }

    /// `C / running_sum` at working precision.
    ///
    /// # Errors
    ///
    /// Returns [`PiError::ArithmeticFailure`] when the running sum is zero.
    pub fn pi_estimate(
        context: &PrecisionContext,
        running_sum: &Decimal,
    ) -> Result<Decimal, PiError> {
        context
            .scaling_constant()
            .checked_div(running_sum)
            .ok_or_else(|| PiError::ArithmeticFailure("series sum is zero".into()))
    }

    /// Cut a working-precision value to `digits` fractional digits.
    #[must_use]
    pub fn render(&self, estimate: &Decimal, digits: u32) -> String {
        match self.mode {
            DigitMode::Truncate => {
                let mut rendered = estimate.to_string();
                rendered.truncate(digits as usize + 2);
                rendered
            }
            DigitMode::Round => estimate.round_to_scale(digits).to_string(),
        }
    }

    /// Divide and render in one step.
    pub fn format(
        &self,
        context: &PrecisionContext,
        running_sum: &Decimal,
    ) -> Result<String, PiError> {
        let estimate = Self::pi_estimate(context, running_sum)?;
        Ok(self.render(&estimate, context.requested_digits()))
    }
}
