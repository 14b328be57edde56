//! API errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use picalc_core::PiError;
use picalc_orchestration::OrchestrationError;

use crate::api::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("invalid task id: {0}")]
    InvalidTaskId(String),

    #[error("unknown task: {0}")]
    UnknownTask(String),

    #[error("task failed: {0}")]
    TaskFailed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) | Self::InvalidTaskId(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UnknownTask(_) => StatusCode::NOT_FOUND,
            Self::TaskFailed(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<OrchestrationError> for ApiError {
    fn from(err: OrchestrationError) -> Self {
        match err {
            OrchestrationError::Engine(PiError::InvalidArgument(msg)) => Self::InvalidArgument(msg),
            OrchestrationError::InvalidTaskId(id) => Self::InvalidTaskId(id),
            OrchestrationError::UnknownTask(id) => Self::UnknownTask(id),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
