//! Router and handlers.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::debug;

use picalc_orchestration::TaskId;

use crate::api::{CalculatePiParams, CalculatePiResponse, CheckProgressParams, CheckProgressResponse};
use crate::error::ApiError;
use crate::AppState;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/calculate_pi", get(calculate_pi))
        .route("/check_progress", get(check_progress))
        .with_state(state)
}

/// Start a background computation of `n` decimals of pi.
async fn calculate_pi(
    State(state): State<AppState>,
    Query(params): Query<CalculatePiParams>,
) -> Result<Json<CalculatePiResponse>, ApiError> {
    let id = state.runner.submit(params.n)?;
    Ok(Json(CalculatePiResponse {
        task_id: id.to_string(),
    }))
}

/// Report progress and, once finished, the result of a task.
async fn check_progress(
    State(state): State<AppState>,
    Query(params): Query<CheckProgressParams>,
) -> Result<Json<CheckProgressResponse>, ApiError> {
    let id: TaskId = params.task_id.parse()?;
    let status = state.runner.status(&id)?;
    debug!(task = %id, state = ?status.state, progress = status.progress, "Progress polled");

    let error = status.error.clone();
    CheckProgressResponse::from_status(status)
        .map(Json)
        .ok_or_else(|| ApiError::TaskFailed(error.unwrap_or_default()))
}
