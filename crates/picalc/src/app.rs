//! Application entry point and dispatch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam_channel::RecvTimeoutError;
use tracing::{debug, info, warn};

use picalc_cli::output::write_to_file;
use picalc_cli::presenter::{CLIProgressReporter, CLIResultPresenter};
use picalc_core::calculator::{ChudnovskyCalculator, PiError};
use picalc_core::observers::ChannelObserver;
use picalc_core::progress::{CancellationToken, ProgressUpdate};
use picalc_orchestration::interfaces::{ProgressReporter, ResultPresenter};
use picalc_orchestration::{execute_calculation, InMemoryTaskStore, TaskRunner};
use picalc_server::AppState;

use crate::config::AppConfig;
use crate::version::full_version;

/// How often the CLI loop wakes up to check the deadline.
const DEADLINE_POLL: Duration = Duration::from_millis(50);

/// Capacity of the progress channel; overflowing updates are dropped.
const PROGRESS_CHANNEL_CAPACITY: usize = 256;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        picalc_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    debug!(version = %full_version(), "Starting");

    if let Some(addr) = config.serve {
        return run_server(config, addr);
    }

    run_cli(config)
}

fn run_server(config: &AppConfig, addr: std::net::SocketAddr) -> Result<()> {
    let runner = TaskRunner::new(
        Arc::new(ChudnovskyCalculator::new()),
        Arc::new(InMemoryTaskStore::with_capacity(config.task_capacity)),
        config.workers,
    )?
    .with_options(config.options());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    info!(version = %full_version(), %addr, "Starting HTTP server");
    runtime
        .block_on(picalc_server::serve(addr, AppState::new(runner)))
        .with_context(|| format!("server on {addr} failed"))
}

fn run_cli(config: &AppConfig) -> Result<()> {
    let timeout = config.timeout_duration()?;
    let opts = config.options();
    let digits = config.digits;

    let cancel = CancellationToken::new();
    install_ctrlc_handler(cancel.clone())?;

    let (tx, rx) = crossbeam_channel::bounded::<ProgressUpdate>(PROGRESS_CHANNEL_CAPACITY);
    let worker_cancel = cancel.clone();
    let worker = std::thread::Builder::new()
        .name("picalc-compute".into())
        .spawn(move || {
            let observer = ChannelObserver::new(tx);
            execute_calculation(
                &ChudnovskyCalculator::new(),
                digits,
                &opts,
                &worker_cancel,
                &observer,
            )
        })
        .context("failed to spawn the computation thread")?;

    // The channel disconnects once the worker drops its observer.
    let reporter = CLIProgressReporter::new(config.quiet);
    let deadline = Instant::now() + timeout;
    let mut timed_out = false;
    loop {
        match rx.recv_timeout(DEADLINE_POLL) {
            Ok(update) => reporter.report(&update),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        if !timed_out && Instant::now() >= deadline {
            warn!(timeout = %config.timeout, "Timeout reached, cancelling");
            cancel.cancel();
            timed_out = true;
        }
    }
    reporter.complete();

    let mut result = worker
        .join()
        .map_err(|_| anyhow::anyhow!("computation thread panicked"))?;
    if timed_out && matches!(result.outcome, Err(PiError::Cancelled)) {
        result.outcome = Err(PiError::Timeout(config.timeout.clone()));
    }

    let value = match &result.outcome {
        Ok(value) => value,
        Err(e) => return Err(e.clone().into()),
    };

    CLIResultPresenter::new(config.verbose, config.quiet).present_result(&result, config.details);

    if let Some(path) = &config.output {
        write_to_file(path, value)
            .with_context(|| format!("cannot write result to {}", path.display()))?;
        info!(path = %path.display(), "Result written");
    }

    Ok(())
}

fn install_ctrlc_handler(cancel: CancellationToken) -> Result<()> {
    ctrlc::set_handler(move || cancel.cancel()).context("cannot install the Ctrl+C handler")
}
