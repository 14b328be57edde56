//! Constants for the Chudnovsky series, precision management and reporting.

/// Linear coefficient `K` of the term numerator `K*n + M`.
pub const CHUDNOVSKY_K: i64 = 545_140_134;

/// Constant `M` of the term numerator, also the zeroth term of the series.
pub const CHUDNOVSKY_M: i64 = 13_591_409;

/// Base of the geometric denominator: `X = -640320^3`.
pub const CHUDNOVSKY_X: i64 = -262_537_412_640_768_000;

/// Multiplier of the scaling constant `C = 426880 * sqrt(10005)`.
pub const CHUDNOVSKY_C_FACTOR: u32 = 426_880;

/// Radicand of the scaling constant `C = 426880 * sqrt(10005)`.
pub const CHUDNOVSKY_C_RADICAND: u32 = 10_005;

/// Extra fractional digits carried above the requested digit count.
pub const GUARD_DIGITS: u32 = 10;

/// Approximate number of correct decimal digits contributed per term.
pub const DIGITS_PER_TERM: u64 = 14;

/// Minimum progress change (1%) before a throttled observer reports an update.
pub const PROGRESS_REPORT_THRESHOLD: f64 = 0.01;

/// Process exit codes for the `picalc` binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error, including arithmetic failures.
    pub const ERROR_GENERIC: i32 = 1;
    /// Computation timed out.
    pub const ERROR_TIMEOUT: i32 = 2;
    /// Invalid digit count or configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Computation cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
