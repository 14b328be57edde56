//! Observer pattern for progress tracking.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::progress::ProgressUpdate;

/// Observer trait for receiving progress updates.
pub trait ProgressObserver: Send + Sync {
    /// Receive a progress update.
    fn on_progress(&self, update: &ProgressUpdate);
}

/// Fans one stream of updates out to several observers.
pub struct ProgressSubject {
    observers: RwLock<Vec<Arc<dyn ProgressObserver>>>,
}

impl ProgressSubject {
    /// Create a new subject with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Register an observer.
    pub fn register(&self, observer: Arc<dyn ProgressObserver>) {
        self.observers.write().push(observer);
    }

    /// Get the number of registered observers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.observers.read().len()
    }
}

impl Default for ProgressSubject {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for ProgressSubject {
    fn on_progress(&self, update: &ProgressUpdate) {
        for observer in self.observers.read().iter() {
            observer.on_progress(update);
        }
    }
}
