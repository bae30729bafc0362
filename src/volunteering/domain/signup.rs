//! Signup records linking a volunteer to a task.

use super::{SignupId, TaskId, VolunteerId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A volunteer's signup for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSignup {
    id: SignupId,
    task_id: TaskId,
    volunteer_id: VolunteerId,
    signup_date: DateTime<Utc>,
}

impl TaskSignup {
    /// Creates a signup stamped with the current clock time.
    #[must_use]
    pub fn new(task_id: TaskId, volunteer_id: VolunteerId, clock: &impl Clock) -> Self {
        Self {
            id: SignupId::new(),
            task_id,
            volunteer_id,
            signup_date: clock.utc(),
        }
    }

    /// Reconstructs a signup from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: SignupId,
        task_id: TaskId,
        volunteer_id: VolunteerId,
        signup_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            volunteer_id,
            signup_date,
        }
    }

    /// Returns the signup identifier.
    #[must_use]
    pub const fn id(&self) -> SignupId {
        self.id
    }

    /// Returns the task signed up for.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the volunteer who signed up.
    #[must_use]
    pub const fn volunteer_id(&self) -> VolunteerId {
        self.volunteer_id
    }

    /// Returns when the signup was created.
    #[must_use]
    pub const fn signup_date(&self) -> DateTime<Utc> {
        self.signup_date
    }
}

/// Result of a signup request.
///
/// Signing up twice for the same task is not an error: the second request
/// yields the record created by the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "signup", rename_all = "snake_case")]
pub enum SignupOutcome {
    /// A new signup was stored.
    Created(TaskSignup),
    /// The volunteer was already signed up; nothing was written.
    AlreadyExists(TaskSignup),
}

impl SignupOutcome {
    /// Returns the signup regardless of how it was obtained.
    #[must_use]
    pub const fn signup(&self) -> &TaskSignup {
        match self {
            Self::Created(signup) | Self::AlreadyExists(signup) => signup,
        }
    }

    /// Consumes the outcome and returns the signup.
    #[must_use]
    pub fn into_signup(self) -> TaskSignup {
        match self {
            Self::Created(signup) | Self::AlreadyExists(signup) => signup,
        }
    }

    /// Returns `true` when this request created the signup.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
