//! Blue-green status rendering.

use super::{ProcessInstance, ProcessState};
use serde::Serialize;

/// Closed status vocabulary exposed to blue-green deployment callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlueGreenStatus {
    /// Running.
    InProgress,
    /// Finished successfully.
    Completed,
    /// Not started yet.
    NotStarted,
    /// Finished with an error.
    Failed,
    /// Cancelled.
    Terminated,
}

impl BlueGreenStatus {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::NotStarted => "NOT_STARTED",
            Self::Failed => "FAILED",
            Self::Terminated => "TERMINATED",
        }
    }
}

impl From<ProcessState> for BlueGreenStatus {
    fn from(state: ProcessState) -> Self {
        match state {
            ProcessState::NotStarted => Self::NotStarted,
            ProcessState::InProgress => Self::InProgress,
            ProcessState::Completed => Self::Completed,
            ProcessState::Failed => Self::Failed,
            ProcessState::Terminated => Self::Terminated,
        }
    }
}

/// Maps an orchestrator state to its blue-green status string.
///
/// An absent state has no status.
#[must_use]
pub fn task_status_to_string(state: Option<ProcessState>) -> Option<&'static str> {
    state.map(|value| BlueGreenStatus::from(value).as_str())
}

/// Status of one task as rendered for blue-green callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStatusView {
    /// Task name.
    pub name: String,
    /// Rendered status.
    pub status: Option<&'static str>,
}

/// Status of a process instance and its tasks for blue-green callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlueGreenStatusView {
    /// Process identifier.
    pub process_id: String,
    /// Rendered instance status.
    pub status: Option<&'static str>,
    /// Rendered task statuses, in definition order.
    pub tasks: Vec<TaskStatusView>,
}

impl BlueGreenStatusView {
    /// Renders the view for an instance.
    #[must_use]
    pub fn from_instance(instance: &ProcessInstance) -> Self {
        Self {
            process_id: instance.id().as_str().to_owned(),
            status: task_status_to_string(Some(instance.state())),
            tasks: instance
                .tasks()
                .iter()
                .map(|task| TaskStatusView {
                    name: task.name().to_owned(),
                    status: task_status_to_string(Some(task.state())),
                })
                .collect(),
        }
    }
}
