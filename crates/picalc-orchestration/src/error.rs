//! Orchestration errors.

use picalc_core::PiError;

/// Errors raised by the task runner and task lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrchestrationError {
    /// No task was ever submitted under this handle.
    #[error("unknown task: {0}")]
    UnknownTask(String),

    /// The handle is not a valid task identifier.
    #[error("invalid task id: {0}")]
    InvalidTaskId(String),

    /// The engine rejected the request before any work started.
    #[error(transparent)]
    Engine(#[from] PiError),

    /// The worker pool could not be created.
    #[error("worker pool error: {0}")]
    WorkerPool(String),
}
