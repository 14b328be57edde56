//! Core orchestration: single-shot execution and the background task runner.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use picalc_core::calculator::Calculator;
use picalc_core::context::validate_digits;
use picalc_core::observer::{ProgressObserver, ProgressSubject};
use picalc_core::observers::LoggingObserver;
use picalc_core::options::Options;
use picalc_core::progress::{CancellationToken, ProgressUpdate};

use crate::error::OrchestrationError;
use crate::interfaces::{CalculationResult, TaskStatus, TaskStore};
use crate::task::TaskId;

/// Poll interval of [`TaskRunner::wait_for`].
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Minimum spacing of per-task progress log lines.
const PROGRESS_LOG_INTERVAL_MS: u64 = 1000;

/// Run one calculation on the calling thread.
pub fn execute_calculation(
    calculator: &dyn Calculator,
    digits: i64,
    opts: &Options,
    cancel: &CancellationToken,
    observer: &dyn ProgressObserver,
) -> CalculationResult {
    let counter = TermCounter {
        terms: AtomicU64::new(0),
        inner: observer,
    };
    let start = Instant::now();
    let outcome = calculator.calculate(cancel, &counter, digits, opts);
    let duration = start.elapsed();
    let terms = counter.terms.load(Ordering::Relaxed);

    debug!(
        algorithm = calculator.name(),
        digits,
        terms,
        ok = outcome.is_ok(),
        elapsed_ms = duration.as_millis(),
        "Calculation finished"
    );

    CalculationResult {
        algorithm: calculator.name().to_string(),
        digits,
        terms,
        outcome,
        duration,
    }
}

/// Records the last summed term index before forwarding each update.
struct TermCounter<'a> {
    terms: AtomicU64,
    inner: &'a dyn ProgressObserver,
}

impl ProgressObserver for TermCounter<'_> {
    fn on_progress(&self, update: &ProgressUpdate) {
        if !update.done {
            self.terms.fetch_max(update.index, Ordering::Relaxed);
        }
        self.inner.on_progress(update);
    }
}

/// Persists every in-progress update of one task into the store.
struct StoreObserver {
    id: TaskId,
    store: Arc<dyn TaskStore>,
}

impl ProgressObserver for StoreObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        // The terminal state is written by the runner with the result.
        if !update.done {
            self.store.put(self.id, TaskStatus::progress(update.fraction));
        }
    }
}

/// Runs pi computations on a dedicated worker pool and records their state.
pub struct TaskRunner {
    calculator: Arc<dyn Calculator>,
    store: Arc<dyn TaskStore>,
    pool: ThreadPool,
    tokens: Arc<RwLock<HashMap<TaskId, CancellationToken>>>,
    options: Options,
}

impl TaskRunner {
    /// Create a runner with `workers` threads; `0` uses one per CPU.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::WorkerPool`] when the pool cannot start.
    pub fn new(
        calculator: Arc<dyn Calculator>,
        store: Arc<dyn TaskStore>,
        workers: usize,
    ) -> Result<Self, OrchestrationError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("picalc-worker-{i}"))
            .build()
            .map_err(|e| OrchestrationError::WorkerPool(e.to_string()))?;

        info!(
            calculator = calculator.name(),
            workers = pool.current_num_threads(),
            "Task runner started"
        );

        Ok(Self {
            calculator,
            store,
            pool,
            tokens: Arc::new(RwLock::new(HashMap::new())),
            options: Options::default(),
        })
    }

    /// Use `options` for every task submitted afterwards.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Number of worker threads.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Accept a computation of `digits` decimals and return its handle
    /// without waiting for any work.
    ///
    /// # Errors
    ///
    /// Rejects `digits <= 0` before a task is created.
    pub fn submit(&self, digits: i64) -> Result<TaskId, OrchestrationError> {
        validate_digits(digits)?;

        let id = TaskId::new();
        let cancel = CancellationToken::new();
        self.store.put(id, TaskStatus::pending());
        self.tokens.write().insert(id, cancel.clone());

        let calculator = Arc::clone(&self.calculator);
        let store = Arc::clone(&self.store);
        let tokens = Arc::clone(&self.tokens);
        let options = self.options.clone();

        info!(task = %id, digits, "Task accepted");
        self.pool.spawn(move || {
            run_task(id, digits, calculator.as_ref(), &store, &options, &cancel);
            tokens.write().remove(&id);
        });

        Ok(id)
    }

    /// Latest persisted state of a task.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::UnknownTask`] for handles never issued.
    pub fn status(&self, id: &TaskId) -> Result<TaskStatus, OrchestrationError> {
        self.store
            .get(id)
            .ok_or_else(|| OrchestrationError::UnknownTask(id.to_string()))
    }

    /// Request cancellation of a running task.
    ///
    /// Returns `false` when the task is not running anymore.
    pub fn cancel(&self, id: &TaskId) -> bool {
        match self.tokens.read().get(id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Block until the task is terminal or `timeout` elapses, returning the
    /// last observed state.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::UnknownTask`] for handles never issued.
    pub fn wait_for(
        &self,
        id: &TaskId,
        timeout: Duration,
    ) -> Result<TaskStatus, OrchestrationError> {
        let deadline = Instant::now() + timeout;
        loop {
            let status = self.status(id)?;
            if status.is_terminal() || Instant::now() >= deadline {
                return Ok(status);
            }
            std::thread::sleep(WAIT_POLL_INTERVAL);
        }
    }
}

fn run_task(
    id: TaskId,
    digits: i64,
    calculator: &dyn Calculator,
    store: &Arc<dyn TaskStore>,
    options: &Options,
    cancel: &CancellationToken,
) {
    store.put(id, TaskStatus::progress(0.0));
    let observer = ProgressSubject::new();
    observer.register(Arc::new(StoreObserver {
        id,
        store: Arc::clone(store),
    }));
    observer.register(Arc::new(LoggingObserver::new(PROGRESS_LOG_INTERVAL_MS)));

    let result = execute_calculation(calculator, digits, options, cancel, &observer);
    match result.outcome {
        Ok(digits_text) => {
            info!(
                task = %id,
                digits,
                elapsed_ms = result.duration.as_millis(),
                "Task finished"
            );
            store.put(id, TaskStatus::success(digits_text));
        }
        Err(e) => {
            warn!(task = %id, digits, error = %e, "Task failed");
            let progress = store.get(&id).map_or(0.0, |s| s.progress);
            store.put(id, TaskStatus::failure(progress, e.to_string()));
        }
    }
}
