//! Handles to platform export jobs

use super::ids::JobId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State the platform reported for a job when it was acknowledged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Unsubmitted,
    Ready,
    Running,
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl Default for JobState {
    fn default() -> Self {
        Self::Ready
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            JobState::Unsubmitted => "UNSUBMITTED",
            JobState::Ready => "READY",
            JobState::Running => "RUNNING",
            JobState::Completed => "COMPLETED",
            JobState::Failed => "FAILED",
            JobState::Cancelled => "CANCELLED",
            JobState::Unknown => "UNKNOWN",
        };
        f.write_str(state)
    }
}

/// Platform acknowledgement of one export job
///
/// The tool does not track jobs after submission; the handle is reported to
/// the user so the job can be followed on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub id: JobId,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub state: JobState,
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{} [{}]", self.id, self.state)
        } else {
            write!(f, "{} ({}) [{}]", self.id, self.description, self.state)
        }
    }
}
