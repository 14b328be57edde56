//! CLI output formatting.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

/// Decimals kept on each side of an abbreviated result.
const ABBREVIATE_KEEP: usize = 50;

/// Format a result for display, abbreviating long ones unless `verbose`.
///
/// Results are ASCII (`"3."` followed by decimals), so byte slicing is safe.
#[must_use]
pub fn format_result(value: &str, verbose: bool) -> String {
    let decimals = value.len().saturating_sub(2);
    if verbose || decimals <= 2 * ABBREVIATE_KEEP || !value.is_ascii() {
        return value.to_string();
    }
    format!(
        "{}...{} ({} decimals)",
        &value[..2 + ABBREVIATE_KEEP],
        &value[value.len() - ABBREVIATE_KEEP..],
        format_number(decimals as u64)
    )
}

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Write the result, newline-terminated, to `path`.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: &Path, value: &str) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{value}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_units() {
        assert!(format_duration(Duration::from_nanos(500)).ends_with("µs"));
        assert!(format_duration(Duration::from_millis(42)).ends_with("ms"));
        assert_eq!(format_duration(Duration::from_millis(3140)), "3.140s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30.0s");
    }

    #[test]
    fn format_number_thousands() {
        assert_eq!(format_number(1_000_000), "1,000,000");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(0), "0");
    }

    #[test]
    fn short_result_is_unchanged() {
        assert_eq!(format_result("3.14159", false), "3.14159");
    }

    #[test]
    fn long_result_is_abbreviated() {
        let value = format!("3.{}", "1".repeat(60) + &"9".repeat(60));
        let shown = format_result(&value, false);
        assert!(shown.starts_with(&format!("3.{}", "1".repeat(50))));
        assert!(shown.contains("..."));
        assert!(shown.ends_with("(120 decimals)"));
        assert_eq!(format_result(&value, true), value);
    }

    #[test]
    fn write_result_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pi.txt");
        write_to_file(&path, "3.14159").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "3.14159\n");
    }
}
