//! Process lifecycle state machine.

use super::ParseProcessStateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a process instance or one of its tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    /// Created but not yet started.
    NotStarted,
    /// Running.
    InProgress,
    /// Finished successfully.
    Completed,
    /// Finished with an error; may be retried.
    Failed,
    /// Cancelled; may be retried.
    Terminated,
}

impl ProcessState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Terminated => "TERMINATED",
        }
    }

    /// Returns whether the state ends a run.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Terminated)
    }

    /// Returns whether moving from `self` to `target` is allowed.
    ///
    /// `NotStarted → InProgress → {Completed | Failed | Terminated}`, a
    /// not-yet-started process may be terminated, and retry moves `Failed`
    /// or `Terminated` back to `InProgress`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::NotStarted, Self::InProgress | Self::Terminated)
                | (
                    Self::InProgress,
                    Self::Completed | Self::Failed | Self::Terminated
                )
                | (Self::Failed | Self::Terminated, Self::InProgress)
        )
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProcessState {
    type Error = ParseProcessStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "NOT_STARTED" => Ok(Self::NotStarted),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            "TERMINATED" => Ok(Self::Terminated),
            _ => Err(ParseProcessStateError(value.to_owned())),
        }
    }
}
