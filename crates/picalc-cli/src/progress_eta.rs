//! Progress and ETA calculation.

use std::time::{Duration, Instant};

/// Estimates the time remaining from the elapsed time and the completion fraction.
///
/// The fraction comes from the term-count heuristic, so the estimate is advisory.
pub struct ETACalculator {
    start_time: Instant,
    last_progress: f64,
}

impl ETACalculator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            last_progress: 0.0,
        }
    }

    /// Record `progress` and return the estimated time remaining.
    pub fn update(&mut self, progress: f64) -> Option<Duration> {
        if progress <= 0.0 || progress >= 1.0 {
            return None;
        }
        self.last_progress = progress;

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let remaining = elapsed / progress - elapsed;
        (remaining > 0.0).then(|| Duration::from_secs_f64(remaining))
    }

    /// Last fraction passed to [`update`](Self::update).
    #[must_use]
    pub fn last_progress(&self) -> f64 {
        self.last_progress
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for ETACalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_eta_at_bounds() {
        let mut calc = ETACalculator::new();
        assert!(calc.update(0.0).is_none());
        assert!(calc.update(1.0).is_none());
    }

    #[test]
    fn eta_after_some_progress() {
        let mut calc = ETACalculator::new();
        std::thread::sleep(Duration::from_millis(20));
        let eta = calc.update(0.5).unwrap();
        assert!(eta >= Duration::from_millis(10));
        assert!((calc.last_progress() - 0.5).abs() < f64::EPSILON);
    }
}
