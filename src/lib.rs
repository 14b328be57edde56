//! Shared fixtures for the workspace integration tests.

use serde::Deserialize;

/// Expansion of pi stored in `tests/testdata/pi_golden.json`.
#[derive(Debug, Deserialize)]
pub struct GoldenData {
    pub description: String,
    /// Decimals after `"3."`.
    pub decimals: String,
    pub values: Vec<GoldenEntry>,
}

/// Expected renderings for one digit count.
#[derive(Debug, Deserialize)]
pub struct GoldenEntry {
    pub digits: i64,
    pub truncated: String,
    pub rounded: String,
}

/// Load the golden fixture.
///
/// # Panics
///
/// Panics when the fixture is missing or malformed.
#[must_use]
pub fn load_golden() -> GoldenData {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/pi_golden.json");
    let text = std::fs::read_to_string(path).expect("cannot read pi golden file");
    serde_json::from_str(&text).expect("malformed pi golden file")
}
