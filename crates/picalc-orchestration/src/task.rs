//! Opaque task handles.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::OrchestrationError;

const HYPHENATED_LEN: usize = 36;

/// Handle returned on submission and used to poll a task.
///
/// Rendered as a 36-character hyphenated UUID; only that form parses back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    /// A fresh random (v4) task id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TaskId {
    type Err = OrchestrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // At 36 characters the hyphenated form is the only one `Uuid` accepts.
        if s.len() != HYPHENATED_LEN {
            return Err(OrchestrationError::InvalidTaskId(format!(
                "{s}: expected a {HYPHENATED_LEN}-character hyphenated UUID"
            )));
        }
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| OrchestrationError::InvalidTaskId(format!("{s}: {e}")))
    }
}
