//! Per-computation precision context.

use num_bigint::BigInt;

use crate::calculator::PiError;
use crate::constants::{CHUDNOVSKY_C_FACTOR, CHUDNOVSKY_C_RADICAND, DIGITS_PER_TERM, GUARD_DIGITS};
use crate::decimal::{pow10, Decimal};

/// Largest working precision the fixed-point representation supports.
///
/// Square roots widen the mantissa to twice the scale, which must stay a `u32`.
pub const MAX_WORKING_PRECISION: u32 = u32::MAX / 2;

/// Validate a requested digit count and narrow it to `u32`.
pub fn validate_digits(requested_digits: i64) -> Result<u32, PiError> {
    if requested_digits <= 0 {
        return Err(PiError::InvalidArgument(format!(
            "number of digits must be greater than 0, got {requested_digits}"
        )));
    }
    u32::try_from(requested_digits)
        .ok()
        .filter(|digits| *digits <= MAX_WORKING_PRECISION - GUARD_DIGITS)
        .ok_or_else(|| {
            PiError::InvalidArgument(format!(
                "number of digits {requested_digits} exceeds the representable precision"
            ))
        })
}

/// Immutable precision settings and derived constants for one computation.
///
/// Each computation owns its own context; nothing here is process-wide.
#[derive(Debug, Clone)]
pub struct PrecisionContext {
    requested_digits: u32,
    working_precision: u32,
    scaling_constant: Decimal,
    convergence_threshold: Decimal,
    estimated_total_terms: u64,
}

impl PrecisionContext {
    /// Build the context for `requested_digits` decimals.
    ///
    /// # Errors
    ///
    /// Returns [`PiError::InvalidArgument`] when `requested_digits <= 0`.
    pub fn new(requested_digits: i64) -> Result<Self, PiError> {
        let requested_digits = validate_digits(requested_digits)?;
        let working_precision = requested_digits + GUARD_DIGITS;

        // sqrt(426880^2 * 10005) keeps the multiplier inside the single rounding step.
        let factor = BigInt::from(CHUDNOVSKY_C_FACTOR);
        let radicand = &factor * &factor * CHUDNOVSKY_C_RADICAND;
        let scaling_constant = Decimal::sqrt(&radicand, working_precision)
            .ok_or_else(|| PiError::ArithmeticFailure("negative radicand".into()))?;

        // 10^-d at scale d + guard is 10^guard in mantissa units.
        let convergence_threshold = Decimal::from_mantissa(pow10(GUARD_DIGITS), working_precision);

        Ok(Self {
            requested_digits,
            working_precision,
            scaling_constant,
            convergence_threshold,
            estimated_total_terms: u64::from(requested_digits) / DIGITS_PER_TERM + 1,
        })
    }

    /// Decimal digits requested after the point.
    #[must_use]
    pub fn requested_digits(&self) -> u32 {
        self.requested_digits
    }

    /// Fractional digits carried by every intermediate value.
    #[must_use]
    pub fn working_precision(&self) -> u32 {
        self.working_precision
    }

    /// `C = 426880 * sqrt(10005)` at working precision.
    #[must_use]
    pub fn scaling_constant(&self) -> &Decimal {
        &self.scaling_constant
    }

    /// `10^-requested_digits` at working precision.
    #[must_use]
    pub fn convergence_threshold(&self) -> &Decimal {
        &self.convergence_threshold
    }

    /// A-priori term count estimate, `floor(digits / 14) + 1`.
    #[must_use]
    pub fn estimated_total_terms(&self) -> u64 {
        self.estimated_total_terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_digits() {
        assert!(matches!(
            PrecisionContext::new(0),
            Err(PiError::InvalidArgument(_))
        ));
        assert!(matches!(
            PrecisionContext::new(-5),
            Err(PiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_unrepresentable_digits() {
        assert!(matches!(
            validate_digits(i64::from(u32::MAX)),
            Err(PiError::InvalidArgument(_))
        ));
        assert!(validate_digits(1).is_ok());
    }

    #[test]
    fn working_precision_adds_guard_digits() {
        let ctx = PrecisionContext::new(50).unwrap();
        assert_eq!(ctx.requested_digits(), 50);
        assert_eq!(ctx.working_precision(), 60);
        assert_eq!(ctx.scaling_constant().scale(), 60);
    }

    #[test]
    fn scaling_constant_value() {
        let ctx = PrecisionContext::new(5).unwrap();
        // 426880 * 100.024996875781... = 42698670.66633...
        assert!(ctx.scaling_constant().to_string().starts_with("42698670.666"));
    }

    #[test]
    fn convergence_threshold_is_power_of_ten() {
        let ctx = PrecisionContext::new(3).unwrap();
        assert_eq!(ctx.convergence_threshold().to_string(), "0.0010000000000");
    }

    #[test]
    fn estimated_total_terms() {
        assert_eq!(PrecisionContext::new(1).unwrap().estimated_total_terms(), 1);
        assert_eq!(PrecisionContext::new(13).unwrap().estimated_total_terms(), 1);
        assert_eq!(PrecisionContext::new(14).unwrap().estimated_total_terms(), 2);
        assert_eq!(PrecisionContext::new(100).unwrap().estimated_total_terms(), 8);
    }

    #[test]
    fn contexts_are_independent() {
        let a = PrecisionContext::new(10).unwrap();
        let b = PrecisionContext::new(40).unwrap();
        assert_eq!(a.working_precision(), 20);
        assert_eq!(b.working_precision(), 50);
    }
}
