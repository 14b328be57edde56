//! Chudnovsky series terms.
//!
//! `term(n) = (6n)! * (K*n + M) / ((3n)! * (n!)^3 * X^n)`
//!
//! [`TermGenerator`] carries the exact rational forward from one index to the
//! next with the update ratio
//!
//! `(6n)!/(3n)!  =  (6n-6)!/(3n-3)! * 8(6n-1)(6n-3)(6n-5)`
//! `(n!)^3 X^n   =  ((n-1)!)^3 X^(n-1) * n^3 X`
//!
//! so each step costs a handful of big-by-small multiplications instead of
//! three fresh factorials. The rational is never reduced or rounded; only
//! [`ExactTerm::to_term`] divides, once.

use num_bigint::BigInt;
use num_traits::{One, Signed};

use crate::calculator::PiError;
use crate::constants::{CHUDNOVSKY_K, CHUDNOVSKY_M, CHUDNOVSKY_X};
use crate::decimal::{pow10, Decimal};

/// A series term rounded to working precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Series index, starting at 1.
    pub index: u64,
    /// Signed value at working precision.
    pub value: Decimal,
}

/// A series term as an exact, unreduced rational.
#[derive(Debug, Clone)]
pub struct ExactTerm {
    index: u64,
    numer: BigInt,
    denom: BigInt,
}

impl ExactTerm {
    #[must_use]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Whether `|term| < 10^-digits`, decided exactly.
    #[must_use]
    pub fn is_below_power_of_ten(&self, digits: u32) -> bool {
        self.numer.abs() * pow10(digits) < self.denom.abs()
    }

    /// Divide once to obtain the term at `scale` fractional digits.
    ///
    /// # Errors
    ///
    /// Returns [`PiError::ArithmeticFailure`] if the denominator is zero.
    pub fn to_term(&self, scale: u32) -> Result<Term, PiError> {
        let value = Decimal::from_ratio(&self.numer, &self.denom, scale).ok_or_else(|| {
            PiError::ArithmeticFailure(format!("zero denominator in term {}", self.index))
        })?;
        Ok(Term {
            index: self.index,
            value,
        })
    }

    /// Exact equality of the represented rationals.
    #[must_use]
    pub fn same_value(&self, other: &Self) -> bool {
        &self.numer * &other.denom == &other.numer * &self.denom
    }
}

fn linear_factor(n: &BigInt) -> BigInt {
    BigInt::from(CHUDNOVSKY_K) * n + CHUDNOVSKY_M
}

/// Incremental generator of exact series terms, starting at index 1.
///
/// # Example
/// ```
/// use picalc_core::term::TermGenerator;
///
/// let first = TermGenerator::new().next().unwrap();
/// assert_eq!(first.index(), 1);
/// assert!(first.is_below_power_of_ten(6));
/// assert!(!first.is_below_power_of_ten(7));
/// ```
#[derive(Debug, Clone)]
pub struct TermGenerator {
    index: u64,
    factorial_ratio: BigInt,
    denominator: BigInt,
}

impl TermGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: 0,
            factorial_ratio: BigInt::one(),
            denominator: BigInt::one(),
        }
    }

    /// Index of the most recently produced term (0 before the first).
    #[must_use]
    pub fn index(&self) -> u64 {
        self.index
    }
}

impl Default for TermGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for TermGenerator {
    type Item = ExactTerm;

    fn next(&mut self) -> Option<ExactTerm> {
        self.index += 1;
        let n = BigInt::from(self.index);
        let six_n: BigInt = &n * 6u32;

        self.factorial_ratio *= (&six_n - 1u32) * (&six_n - 3u32) * (&six_n - 5u32) * 8u32;
        self.denominator *= &n * &n * &n * CHUDNOVSKY_X;

        Some(ExactTerm {
            index: self.index,
            numer: &self.factorial_ratio * linear_factor(&n),
            denom: self.denominator.clone(),
        })
    }
}

fn factorial(n: u64) -> BigInt {
    (2..=n).fold(BigInt::one(), |acc, k| acc * k)
}

/// The term at `index` from the factorial formula, recomputed from scratch.
///
/// Quadratic overall when used for every index; the engine uses
/// [`TermGenerator`] and this serves as its reference.
#[must_use]
pub fn direct_term(index: u32) -> ExactTerm {
    let n = u64::from(index);
    let big_n = BigInt::from(n);
    let n_factorial = factorial(n);

    let numer = factorial(6 * n) * linear_factor(&big_n);
    let denom = factorial(3 * n)
        * n_factorial.pow(3)
        * BigInt::from(CHUDNOVSKY_X).pow(index);

    ExactTerm { index: n, numer, denom }
}
