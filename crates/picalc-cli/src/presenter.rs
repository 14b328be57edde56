//! CLI result presenter and progress reporter.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use parking_lot::Mutex;

use picalc_core::context::PrecisionContext;
use picalc_core::ProgressUpdate;
use picalc_orchestration::interfaces::{CalculationResult, ProgressReporter, ResultPresenter};

use crate::output::{format_duration, format_number, format_result};
use crate::progress_eta::ETACalculator;
use crate::ui::{print_error, print_field, print_header};

/// Resolution of the progress bar.
const BAR_LENGTH: u64 = 1000;

/// CLI result presenter.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_result(&self, result: &CalculationResult, details: bool) {
        let value = match &result.outcome {
            Ok(value) => value,
            Err(e) => {
                self.present_error(&e.to_string());
                return;
            }
        };

        if self.quiet {
            println!("{value}");
            return;
        }

        print_header(&format!("Pi to {} digits", format_number(result.digits.unsigned_abs())));
        print_field("Algorithm", &result.algorithm);
        print_field("Duration", &format_duration(result.duration));

        if details {
            print_field("Terms summed", &format_number(result.terms));
            if let Ok(ctx) = PrecisionContext::new(result.digits) {
                print_field(
                    "Estimated terms",
                    &format_number(ctx.estimated_total_terms()),
                );
                print_field(
                    "Working precision",
                    &format!("{} digits", format_number(u64::from(ctx.working_precision()))),
                );
            }
        }

        println!("{}", format_result(value, self.verbose));
    }

    fn present_error(&self, error: &str) {
        print_error(error);
    }
}

/// Progress bar on stderr, fed from the observer channel.
pub struct CLIProgressReporter {
    bar: ProgressBar,
    eta: Mutex<ETACalculator>,
}

impl CLIProgressReporter {
    /// Create a reporter; a hidden bar when `quiet`.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let target = if quiet {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };
        let bar = ProgressBar::with_draw_target(Some(BAR_LENGTH), target);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {percent:>3}% {msg}")
        {
            bar.set_style(style);
        }
        Self {
            bar,
            eta: Mutex::new(ETACalculator::new()),
        }
    }

    /// Current bar position in `[0, BAR_LENGTH]`.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressReporter for CLIProgressReporter {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn report(&self, update: &ProgressUpdate) {
        let fraction = update.fraction.clamp(0.0, 1.0);
        self.bar.set_position((fraction * BAR_LENGTH as f64) as u64);

        let message = match self.eta.lock().update(fraction) {
            Some(remaining) => format!("term {} (ETA {})", update.index, format_duration(remaining)),
            None => format!("term {}", update.index),
        };
        self.bar.set_message(message);
    }

    fn complete(&self) {
        self.bar.set_position(BAR_LENGTH);
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use picalc_core::PiError;

    use super::*;

    fn result(outcome: Result<String, PiError>) -> CalculationResult {
        CalculationResult {
            algorithm: "Chudnovsky".into(),
            digits: 10,
            terms: 2,
            outcome,
            duration: Duration::from_millis(5),
        }
    }

    #[test]
    fn presenter_modes() {
        let presenter = CLIResultPresenter::new(true, false);
        assert!(presenter.verbose);
        assert!(!presenter.quiet);
    }

    #[test]
    fn present_success_in_every_mode() {
        let ok = result(Ok("3.1415926535".into()));
        CLIResultPresenter::new(false, true).present_result(&ok, false);
        CLIResultPresenter::new(false, false).present_result(&ok, false);
        CLIResultPresenter::new(true, false).present_result(&ok, true);
    }

    #[test]
    fn present_failure() {
        let failed = result(Err(PiError::ArithmeticFailure("series sum is zero".into())));
        CLIResultPresenter::new(false, false).present_result(&failed, true);
    }

    #[test]
    fn reporter_tracks_fraction() {
        let reporter = CLIProgressReporter::new(true);
        reporter.report(&ProgressUpdate::new(100, 4, 0.5));
        assert_eq!(reporter.position(), 500);
        reporter.report(&ProgressUpdate::new(100, 8, 1.0));
        assert_eq!(reporter.position(), BAR_LENGTH);
        reporter.complete();
    }
}
