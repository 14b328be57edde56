//! # picalc-orchestration
//!
//! Runs pi computations off the caller's path, persists their progress
//! per task handle, and executes single-shot runs for the CLI.

pub mod error;
pub mod interfaces;
pub mod orchestrator;
pub mod store;
pub mod task;

pub use error::OrchestrationError;
pub use interfaces::{
    CalculationResult, ProgressReporter, ResultPresenter, TaskState, TaskStatus, TaskStore,
};
pub use orchestrator::{execute_calculation, TaskRunner};
pub use store::{InMemoryTaskStore, DEFAULT_TASK_CAPACITY};
pub use task::TaskId;
