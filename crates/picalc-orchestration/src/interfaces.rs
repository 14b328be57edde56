//! Orchestration interfaces.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use picalc_core::{PiError, ProgressUpdate};

use crate::task::TaskId;

/// Lifecycle of a submitted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Accepted, not yet picked up by a worker.
    Pending,
    /// At least one progress event has been persisted.
    Progress,
    /// Finished with a result.
    Success,
    /// Finished with an error.
    Failure,
}

/// Persisted snapshot of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
    /// Last persisted completion fraction.
    pub progress: f64,
    /// Formatted digits once the task succeeded.
    pub result: Option<String>,
    /// Diagnostic detail once the task failed.
    pub error: Option<String>,
}

impl TaskStatus {
    #[must_use]
    pub fn pending() -> Self {
        Self {
            state: TaskState::Pending,
            progress: 0.0,
            result: None,
            error: None,
        }
    }

    #[must_use]
    pub fn progress(fraction: f64) -> Self {
        Self {
            state: TaskState::Progress,
            progress: fraction,
            result: None,
            error: None,
        }
    }

    #[must_use]
    pub fn success(result: String) -> Self {
        Self {
            state: TaskState::Success,
            progress: 1.0,
            result: Some(result),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(progress: f64, error: String) -> Self {
        Self {
            state: TaskState::Failure,
            progress,
            result: None,
            error: Some(error),
        }
    }

    /// Whether the task will not change state again.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, TaskState::Success | TaskState::Failure)
    }
}

/// Storage of task state keyed by handle.
pub trait TaskStore: Send + Sync {
    /// Record or overwrite the status of a task.
    fn put(&self, id: TaskId, status: TaskStatus);

    /// Look up the latest status of a task.
    fn get(&self, id: &TaskId) -> Option<TaskStatus>;

    /// Number of known tasks.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait for reporting progress to the user.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress update.
    fn report(&self, update: &ProgressUpdate);

    /// Report completion.
    fn complete(&self);
}

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present a calculation result.
    fn present_result(&self, result: &CalculationResult, details: bool);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Result of a single-shot calculation.
#[derive(Debug, Clone)]
pub struct CalculationResult {
    /// Calculator name.
    pub algorithm: String,
    /// Requested digit count.
    pub digits: i64,
    /// Series terms summed after the constant term.
    pub terms: u64,
    /// The formatted digits or a structured error.
    pub outcome: Result<String, PiError>,
    /// Computation duration.
    pub duration: Duration,
}

/// Null progress reporter (does nothing).
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {
    fn report(&self, _update: &ProgressUpdate) {}
    fn complete(&self) {}
}
