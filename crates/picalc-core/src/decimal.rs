//! Fixed-point arbitrary-precision decimals on top of `BigInt`.
//!
//! A [`Decimal`] is `mantissa / 10^scale`. Every value in one computation
//! shares the scale of its [`PrecisionContext`](crate::context::PrecisionContext),
//! so addition is exact and only construction from a ratio, division and
//! square root round.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign};

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{Signed, Zero};

/// `10^exp` as a `BigInt`.
#[must_use]
pub fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

/// Divide `numer` by `denom`, rounding half to even. `denom` must be non-zero.
fn div_round_half_even(numer: &BigInt, denom: &BigInt) -> BigInt {
    let negative = (numer.sign() == Sign::Minus) != (denom.sign() == Sign::Minus);
    let (quot, rem) = numer.abs().div_rem(&denom.abs());
    let twice_rem: BigInt = rem << 1;
    let round_up = match twice_rem.cmp(&denom.abs()) {
        Ordering::Greater => true,
        Ordering::Equal => quot.is_odd(),
        Ordering::Less => false,
    };
    let magnitude = if round_up { quot + 1u32 } else { quot };
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Signed fixed-point decimal with `scale` fractional digits.
#[derive(Debug, Clone)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

impl Decimal {
    /// Zero at the given scale.
    #[must_use]
    pub fn zero(scale: u32) -> Self {
        Self {
            mantissa: BigInt::zero(),
            scale,
        }
    }

    /// Build a decimal directly from its scaled mantissa.
    #[must_use]
    pub fn from_mantissa(mantissa: BigInt, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    /// Exact conversion of an integer.
    #[must_use]
    pub fn from_integer(value: impl Into<BigInt>, scale: u32) -> Self {
        Self {
            mantissa: value.into() * pow10(scale),
            scale,
        }
    }

    /// The exact rational `numer / denom` rounded once, half to even.
    ///
    /// Returns `None` when `denom` is zero.
    #[must_use]
    pub fn from_ratio(numer: &BigInt, denom: &BigInt, scale: u32) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }
        let scaled = numer * pow10(scale);
        Some(Self {
            mantissa: div_round_half_even(&scaled, denom),
            scale,
        })
    }

    /// Floor of the square root of a non-negative integer.
    ///
    /// Returns `None` for a negative radicand.
    #[must_use]
    pub fn sqrt(radicand: &BigInt, scale: u32) -> Option<Self> {
        if radicand.is_negative() {
            return None;
        }
        let widened = radicand * pow10(scale * 2);
        Some(Self {
            mantissa: widened.sqrt(),
            scale,
        })
    }

    /// `self / rhs` at `self`'s scale, rounded half to even.
    ///
    /// Returns `None` when `rhs` is zero.
    #[must_use]
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        let numer = &self.mantissa * pow10(rhs.scale);
        Some(Self {
            mantissa: div_round_half_even(&numer, &rhs.mantissa),
            scale: self.scale,
        })
    }

    /// Multiply by an exact integer.
    #[must_use]
    pub fn mul_integer(&self, factor: impl Into<BigInt>) -> Self {
        Self {
            mantissa: &self.mantissa * factor.into(),
            scale: self.scale,
        }
    }

    /// Rescale to fewer (or more) fractional digits, rounding half to even.
    #[must_use]
    pub fn round_to_scale(&self, scale: u32) -> Self {
        let mantissa = match scale.cmp(&self.scale) {
            Ordering::Equal => self.mantissa.clone(),
            Ordering::Greater => &self.mantissa * pow10(scale - self.scale),
            Ordering::Less => div_round_half_even(&self.mantissa, &pow10(self.scale - scale)),
        };
        Self { mantissa, scale }
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            mantissa: self.mantissa.abs(),
            scale: self.scale,
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Number of fractional digits.
    #[must_use]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// The scaled integer representation.
    #[must_use]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    fn aligned(&self, other: &Self) -> (BigInt, BigInt) {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => (self.mantissa.clone(), other.mantissa.clone()),
            Ordering::Less => (
                &self.mantissa * pow10(other.scale - self.scale),
                other.mantissa.clone(),
            ),
            Ordering::Greater => (
                self.mantissa.clone(),
                &other.mantissa * pow10(self.scale - other.scale),
            ),
        }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.scale == other.scale {
            return self.mantissa.cmp(&other.mantissa);
        }
        let (lhs, rhs) = self.aligned(other);
        lhs.cmp(&rhs)
    }
}

impl AddAssign<&Decimal> for Decimal {
    fn add_assign(&mut self, rhs: &Decimal) {
        if self.scale == rhs.scale {
            self.mantissa += &rhs.mantissa;
        } else {
            let scale = self.scale.max(rhs.scale);
            let (lhs, rhs) = self.aligned(rhs);
            self.mantissa = lhs + rhs;
            self.scale = scale;
        }
    }
}

impl Add<&Decimal> for Decimal {
    type Output = Decimal;

    fn add(mut self, rhs: &Decimal) -> Decimal {
        self += rhs;
        self
    }
}

impl fmt::Display for Decimal {
    /// Plain positional notation with exactly `scale` fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.magnitude().to_string();
        let scale = self.scale as usize;
        let sign = if self.is_negative() { "-" } else { "" };
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let padded = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale + 1 - digits.len()))
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(text: &str, scale: u32) -> Decimal {
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
        let mut frac = frac_part.to_string();
        while frac.len() < scale as usize {
            frac.push('0');
        }
        let joined = format!("{int_part}{frac}");
        Decimal::from_mantissa(joined.parse().unwrap(), scale)
    }

    #[test]
    fn display_pads_small_values() {
        assert_eq!(Decimal::from_mantissa(BigInt::from(5), 3).to_string(), "0.005");
        assert_eq!(Decimal::from_mantissa(BigInt::from(-5), 3).to_string(), "-0.005");
        assert_eq!(Decimal::from_mantissa(BigInt::from(31415), 4).to_string(), "3.1415");
        assert_eq!(Decimal::zero(2).to_string(), "0.00");
        assert_eq!(Decimal::from_integer(42, 0).to_string(), "42");
    }

    #[test]
    fn from_ratio_rounds_half_to_even() {
        let one = BigInt::from(1);
        // 1/8 = 0.125 -> 0.12 (tie, 2 is even)
        let eighth = Decimal::from_ratio(&one, &BigInt::from(8), 2).unwrap();
        assert_eq!(eighth.to_string(), "0.12");
        // 3/8 = 0.375 -> 0.38 (tie, 7 is odd)
        let three_eighths = Decimal::from_ratio(&BigInt::from(3), &BigInt::from(8), 2).unwrap();
        assert_eq!(three_eighths.to_string(), "0.38");
        // 2/3 -> 0.67
        let two_thirds = Decimal::from_ratio(&BigInt::from(2), &BigInt::from(3), 2).unwrap();
        assert_eq!(two_thirds.to_string(), "0.67");
    }

    #[test]
    fn from_ratio_handles_signs() {
        let neg = Decimal::from_ratio(&BigInt::from(2), &BigInt::from(-3), 3).unwrap();
        assert_eq!(neg.to_string(), "-0.667");
        let pos = Decimal::from_ratio(&BigInt::from(-2), &BigInt::from(-3), 3).unwrap();
        assert_eq!(pos.to_string(), "0.667");
    }

    #[test]
    fn from_ratio_zero_denominator() {
        assert!(Decimal::from_ratio(&BigInt::from(1), &BigInt::zero(), 5).is_none());
    }

    #[test]
    fn sqrt_truncates() {
        let root2 = Decimal::sqrt(&BigInt::from(2), 10).unwrap();
        assert_eq!(root2.to_string(), "1.4142135623");
        let root10005 = Decimal::sqrt(&BigInt::from(10_005), 6).unwrap();
        assert_eq!(root10005.to_string(), "100.024996");
        assert!(Decimal::sqrt(&BigInt::from(-1), 4).is_none());
    }

    #[test]
    fn checked_div() {
        let a = dec("1", 6);
        let b = dec("3", 6);
        assert_eq!(a.checked_div(&b).unwrap().to_string(), "0.333333");
        assert!(a.checked_div(&Decimal::zero(6)).is_none());
    }

    #[test]
    fn add_and_compare() {
        let mut sum = dec("1.25", 4);
        sum += &dec("-0.5", 4);
        assert_eq!(sum.to_string(), "0.7500");
        assert!(dec("0.1", 4) < dec("0.2", 4));
        assert!(dec("-0.3", 4).abs() > dec("0.2", 4));
        assert_eq!(dec("0.5", 1), dec("0.50", 2));
    }

    #[test]
    fn round_to_scale() {
        assert_eq!(dec("3.14159265", 8).round_to_scale(4).to_string(), "3.1416");
        assert_eq!(dec("2.5", 1).round_to_scale(0).to_string(), "2");
        assert_eq!(dec("3.5", 1).round_to_scale(0).to_string(), "4");
        assert_eq!(dec("1.2", 1).round_to_scale(3).to_string(), "1.200");
    }

    #[test]
    fn mul_integer() {
        assert_eq!(dec("1.5", 2).mul_integer(-3).to_string(), "-4.50");
    }
}
