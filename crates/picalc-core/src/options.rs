//! Calculation options.

use serde::{Deserialize, Serialize};

/// How the final value is cut to the requested number of digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitMode {
    /// Character truncation of the rendered value. The last digit may be one
    /// below the correctly rounded digit.
    #[default]
    Truncate,
    /// Round half to even at the last requested digit.
    Round,
}

/// Options for a pi computation.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Final digit handling.
    pub digit_mode: DigitMode,
}

impl Options {
    /// Options with rounding instead of truncation.
    #[must_use]
    pub fn rounded() -> Self {
        Self {
            digit_mode: DigitMode::Round,
        }
    }
}
