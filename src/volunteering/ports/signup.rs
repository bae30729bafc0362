//! Repository port for signup persistence.

use super::RepositoryResult;
use crate::volunteering::domain::{SignupId, TaskId, TaskSignup, VolunteerId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Signup persistence contract.
///
/// # Implementation Notes
///
/// Implementations must reject a second signup for the same task and
/// volunteer inside the same atomic step as the insert (a unique index or a
/// check under the write lock), so that two racing requests cannot both
/// succeed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupRepository: Send + Sync {
    /// Stores a new signup.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::DuplicateSignup`] when the volunteer
    /// already holds a signup for the task, or
    /// [`super::RepositoryError::Duplicate`] when the identifier is taken.
    async fn store(&self, signup: &TaskSignup) -> RepositoryResult<()>;

    /// Finds a signup by identifier.
    async fn find_by_id(&self, id: SignupId) -> RepositoryResult<Option<TaskSignup>>;

    /// Finds the signup a volunteer holds for a task, if any.
    async fn find_by_task_and_volunteer(
        &self,
        task_id: TaskId,
        volunteer_id: VolunteerId,
    ) -> RepositoryResult<Option<TaskSignup>>;

    /// Returns the signups for a task, earliest first.
    async fn find_by_task(&self, task_id: TaskId) -> RepositoryResult<Vec<TaskSignup>>;

    /// Returns the signups held by a volunteer, earliest first.
    async fn find_by_volunteer(&self, volunteer_id: VolunteerId)
    -> RepositoryResult<Vec<TaskSignup>>;

    /// Returns signups whose signup date lies within `start..=end`, earliest
    /// first.
    async fn find_by_signup_date_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<TaskSignup>>;

    /// Returns every signup, earliest first.
    async fn list_all(&self) -> RepositoryResult<Vec<TaskSignup>>;

    /// Removes a signup record.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::NotFound`] when the signup does not
    /// exist.
    async fn delete(&self, id: SignupId) -> RepositoryResult<()>;
}
