//! Task status, derived from the task and the current time rather than
//! stored.

use super::{ParseTaskStatusError, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Externally visible task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// The task is open and has not happened yet.
    Available,
    /// No more volunteers are needed. Reserved for capacity tracking and
    /// never produced by [`derive_status`].
    Filled,
    /// The event date is behind us.
    Ended,
    /// The organization cancelled the task.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Filled => "filled",
            Self::Ended => "ended",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "available" => Ok(Self::Available),
            "filled" => Ok(Self::Filled),
            "ended" => Ok(Self::Ended),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Computes the status of `task` as of `now`.
///
/// Cancellation wins over everything else; otherwise a task ends once the
/// date of `now` is past its event date.
#[must_use]
pub fn derive_status(task: &Task, now: DateTime<Utc>) -> TaskStatus {
    if task.cancelled_at().is_some() {
        return TaskStatus::Cancelled;
    }
    if now.date_naive() > task.schedule().event_date() {
        return TaskStatus::Ended;
    }
    TaskStatus::Available
}
