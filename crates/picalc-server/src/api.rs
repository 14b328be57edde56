//! Request and response bodies.

use serde::{Deserialize, Serialize};

use picalc_orchestration::{TaskState, TaskStatus};

/// Client-facing task state; pending and running tasks both read `PROGRESS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiState {
    Progress,
    Finished,
}

#[derive(Debug, Deserialize)]
pub struct CalculatePiParams {
    /// Number of decimal digits to compute.
    pub n: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalculatePiResponse {
    pub task_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckProgressParams {
    pub task_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckProgressResponse {
    pub state: ApiState,
    pub progress: f64,
    pub result: Option<String>,
}

impl CheckProgressResponse {
    /// Map a non-failed task status to its response; `None` for failures.
    #[must_use]
    pub fn from_status(status: TaskStatus) -> Option<Self> {
        let state = match status.state {
            TaskState::Pending | TaskState::Progress => ApiState::Progress,
            TaskState::Success => ApiState::Finished,
            TaskState::Failure => return None,
        };
        Some(Self {
            state,
            progress: status.progress,
            result: status.result,
        })
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_reads_as_progress() {
        let response = CheckProgressResponse::from_status(TaskStatus::pending()).unwrap();
        assert_eq!(response.state, ApiState::Progress);
        assert!(response.result.is_none());
    }

    #[test]
    fn success_reads_as_finished() {
        let response =
            CheckProgressResponse::from_status(TaskStatus::success("3.14".into())).unwrap();
        assert_eq!(response.state, ApiState::Finished);
        assert_eq!(response.result.as_deref(), Some("3.14"));
    }

    #[test]
    fn failure_has_no_progress_response() {
        assert!(
            CheckProgressResponse::from_status(TaskStatus::failure(0.5, "x".into())).is_none()
        );
    }

    #[test]
    fn response_json_shape() {
        let response = CheckProgressResponse {
            state: ApiState::Progress,
            progress: 0.5,
            result: None,
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"state":"PROGRESS","progress":0.5,"result":null}"#
        );
    }
}
