//! Child-before-parent deletion shared by every service that removes an
//! owning record.
//!
//! The policy never deletes the parent itself. Callers delete the parent only
//! after a cascade has returned `Ok`, so a failed cascade never leaves
//! children pointing at a missing parent.

use crate::volunteering::{
    domain::{ErrorKind, Organization, SignupId, TaskId, TaskSignup, VolunteerId},
    ports::{RepositoryError, SignupRepository, TaskRepository},
};
use std::ops::AddAssign;
use std::sync::Arc;
use thiserror::Error;

/// Number of records removed by a cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Signups removed.
    pub signups_removed: usize,
    /// Tasks removed.
    pub tasks_removed: usize,
}

impl AddAssign for CascadeReport {
    fn add_assign(&mut self, other: Self) {
        self.signups_removed += other.signups_removed;
        self.tasks_removed += other.tasks_removed;
    }
}

/// A cascade stopped before all children were removed.
///
/// Children removed before the failure stay removed; the parent is kept.
#[derive(Debug, Clone, Error)]
pub enum CascadeError {
    /// Listing the children to remove failed.
    #[error("failed to load dependants: {0}")]
    Load(#[source] RepositoryError),

    /// Removing a signup failed.
    #[error("failed to delete signup {signup_id} of task {task_id} after {completed:?}: {source}")]
    Signup {
        /// Signup that could not be removed.
        signup_id: SignupId,
        /// Task the signup belongs to.
        task_id: TaskId,
        /// What had been removed before the failure.
        completed: CascadeReport,
        /// Underlying repository failure.
        #[source]
        source: RepositoryError,
    },

    /// Removing an owned task failed.
    #[error("failed to delete task {task_id} after {completed:?}: {source}")]
    Task {
        /// Task that could not be removed.
        task_id: TaskId,
        /// What had been removed before the failure.
        completed: CascadeReport,
        /// Underlying repository failure.
        #[source]
        source: RepositoryError,
    },
}

impl CascadeError {
    /// Classifies this error. A cascade failure is always a storage failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Storage
    }

    fn with_prior(self, prior: CascadeReport) -> Self {
        match self {
            Self::Load(source) => Self::Load(source),
            Self::Signup {
                signup_id,
                task_id,
                mut completed,
                source,
            } => {
                completed += prior;
                Self::Signup {
                    signup_id,
                    task_id,
                    completed,
                    source,
                }
            }
            Self::Task {
                task_id,
                mut completed,
                source,
            } => {
                completed += prior;
                Self::Task {
                    task_id,
                    completed,
                    source,
                }
            }
        }
    }
}

/// Result type for cascade operations.
pub type CascadeResult<T> = Result<T, CascadeError>;

/// Removes dependants ahead of their parent.
#[derive(Clone)]
pub struct CascadeDeletionPolicy<T, S>
where
    T: TaskRepository,
    S: SignupRepository,
{
    tasks: Arc<T>,
    signups: Arc<S>,
}

impl<T, S> CascadeDeletionPolicy<T, S>
where
    T: TaskRepository,
    S: SignupRepository,
{
    /// Creates a policy over the task and signup repositories.
    #[must_use]
    pub const fn new(tasks: Arc<T>, signups: Arc<S>) -> Self {
        Self { tasks, signups }
    }

    /// Deletes every signup of `task_id`, ignoring deadlines. The task itself
    /// is left for the caller.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError`] at the first signup that cannot be removed.
    pub async fn cascade_delete_for_task(&self, task_id: TaskId) -> CascadeResult<CascadeReport> {
        let signups = self
            .signups
            .find_by_task(task_id)
            .await
            .map_err(CascadeError::Load)?;
        self.delete_signups(signups).await
    }

    /// Deletes every signup held by `volunteer_id`, ignoring deadlines. The
    /// volunteer itself is left for the caller.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError`] at the first signup that cannot be removed.
    pub async fn cascade_delete_for_volunteer(
        &self,
        volunteer_id: VolunteerId,
    ) -> CascadeResult<CascadeReport> {
        let signups = self
            .signups
            .find_by_volunteer(volunteer_id)
            .await
            .map_err(CascadeError::Load)?;
        self.delete_signups(signups).await
    }

    /// Deletes every task owned by `organization`, each after its signups.
    /// The organization itself is left for the caller.
    ///
    /// Tasks run in the organization's collection order, followed by any
    /// stored task that names the organization as owner but is missing from
    /// the collection. Ids in the collection with no stored task are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError`] at the first signup or task that cannot be
    /// removed.
    pub async fn cascade_delete_for_organization(
        &self,
        organization: &Organization,
    ) -> CascadeResult<CascadeReport> {
        let task_ids = self.owned_task_ids(organization).await?;
        let mut report = CascadeReport::default();
        for task_id in task_ids {
            let signups = self
                .signups
                .find_by_task(task_id)
                .await
                .map_err(CascadeError::Load)?;
            report += self
                .delete_signups(signups)
                .await
                .map_err(|err| err.with_prior(report))?;

            match self.tasks.delete(task_id).await {
                Ok(()) => report.tasks_removed += 1,
                Err(RepositoryError::NotFound(_)) => {
                    tracing::debug!(task_id = %task_id, "Owned task already absent");
                }
                Err(source) => {
                    tracing::warn!(
                        organization_id = %organization.id(),
                        task_id = %task_id,
                        error = %source,
                        "Cascade aborted while deleting task"
                    );
                    return Err(CascadeError::Task {
                        task_id,
                        completed: report,
                        source,
                    });
                }
            }
        }
        Ok(report)
    }

    async fn owned_task_ids(&self, organization: &Organization) -> CascadeResult<Vec<TaskId>> {
        let stored = self
            .tasks
            .find_by_organization(organization.id())
            .await
            .map_err(CascadeError::Load)?;
        let mut task_ids = organization.task_ids().to_vec();
        for task in stored {
            if !task_ids.contains(&task.id()) {
                tracing::warn!(
                    organization_id = %organization.id(),
                    task_id = %task.id(),
                    "Owned task missing from organization collection"
                );
                task_ids.push(task.id());
            }
        }
        Ok(task_ids)
    }

    async fn delete_signups(&self, signups: Vec<TaskSignup>) -> CascadeResult<CascadeReport> {
        let mut report = CascadeReport::default();
        for signup in signups {
            if let Err(source) = self.signups.delete(signup.id()).await {
                tracing::warn!(
                    signup_id = %signup.id(),
                    task_id = %signup.task_id(),
                    error = %source,
                    "Cascade aborted while deleting signup"
                );
                return Err(CascadeError::Signup {
                    signup_id: signup.id(),
                    task_id: signup.task_id(),
                    completed: report,
                    source,
                });
            }
            report.signups_removed += 1;
        }
        Ok(report)
    }
}
