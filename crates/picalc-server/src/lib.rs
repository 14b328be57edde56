//! # picalc-server
//!
//! HTTP surface over the task runner: one endpoint accepts a computation
//! and returns its handle, the other reports the handle's progress.

pub mod api;
pub mod error;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use picalc_orchestration::TaskRunner;

pub use error::ApiError;
pub use routes::router;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<TaskRunner>,
}

impl AppState {
    #[must_use]
    pub fn new(runner: TaskRunner) -> Self {
        Self {
            runner: Arc::new(runner),
        }
    }
}

/// Serve the API on `addr` until Ctrl+C.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        workers = state.runner.workers(),
        "Pi calculator API listening"
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for Ctrl+C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
