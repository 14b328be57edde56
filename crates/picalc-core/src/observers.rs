//! Concrete observer implementations.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::Sender;
use tracing::{debug, info};

use crate::constants::PROGRESS_REPORT_THRESHOLD;
use crate::observer::ProgressObserver;
use crate::progress::ProgressUpdate;

/// Observer that sends updates through a channel (non-blocking).
pub struct ChannelObserver {
    sender: Sender<ProgressUpdate>,
    last_reported: AtomicU64,
}

impl ChannelObserver {
    #[must_use]
    pub fn new(sender: Sender<ProgressUpdate>) -> Self {
        Self {
            sender,
            last_reported: AtomicU64::new(0f64.to_bits()),
        }
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        let last = f64::from_bits(self.last_reported.load(Ordering::Relaxed));
        if update.done || (update.fraction - last) >= PROGRESS_REPORT_THRESHOLD {
            // A full or disconnected channel drops the update.
            let _ = self.sender.try_send(update.clone());
            self.last_reported
                .store(update.fraction.to_bits(), Ordering::Relaxed);
        }
    }
}

/// Observer that logs progress updates with temporal throttling.
pub struct LoggingObserver {
    last_reported: AtomicU64,
    min_interval_ms: u64,
    last_time: AtomicU64,
}

impl LoggingObserver {
    /// Create a new logging observer with the given minimum interval.
    #[must_use]
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            last_reported: AtomicU64::new(0f64.to_bits()),
            min_interval_ms,
            last_time: AtomicU64::new(0),
        }
    }
}

impl ProgressObserver for LoggingObserver {
    #[allow(clippy::cast_possible_truncation)]
    fn on_progress(&self, update: &ProgressUpdate) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let last_time = self.last_time.load(Ordering::Relaxed);
        if now.saturating_sub(last_time) < self.min_interval_ms && !update.done {
            return;
        }

        let last = f64::from_bits(self.last_reported.load(Ordering::Relaxed));
        if update.done || (update.fraction - last) >= PROGRESS_REPORT_THRESHOLD {
            if update.done {
                info!(digits = update.digits, "Pi computation complete");
            } else {
                debug!(
                    digits = update.digits,
                    term = update.index,
                    progress = format!("{:.1}%", update.fraction * 100.0),
                    "Progress update"
                );
            }
            self.last_reported
                .store(update.fraction.to_bits(), Ordering::Relaxed);
            self.last_time.store(now, Ordering::Relaxed);
        }
    }
}

/// Null object pattern: does nothing with progress updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl NoOpObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProgressObserver for NoOpObserver {
    fn on_progress(&self, _update: &ProgressUpdate) {}
}
