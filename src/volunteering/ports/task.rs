//! Repository port for task persistence.

use super::RepositoryResult;
use crate::volunteering::domain::{OrganizationId, Task, TaskId};
use async_trait::async_trait;

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::Duplicate`] when the identifier is
    /// already taken.
    async fn store(&self, task: &Task) -> RepositoryResult<()>;

    /// Persists changes to an existing task (details, cancellation marker,
    /// timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> RepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>>;

    /// Returns every task, oldest first.
    async fn list_all(&self) -> RepositoryResult<Vec<Task>>;

    /// Returns the tasks owned by an organization, oldest first.
    async fn find_by_organization(
        &self,
        organization_id: OrganizationId,
    ) -> RepositoryResult<Vec<Task>>;

    /// Removes a task record. Signups are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> RepositoryResult<()>;
}
