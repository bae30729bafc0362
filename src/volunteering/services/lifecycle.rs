//! Service layer for task creation, editing, status and deletion.

use super::cascade::{CascadeDeletionPolicy, CascadeError, CascadeReport};
use crate::volunteering::{
    domain::{
        ErrorKind, OrganizationId, Task, TaskDetails, TaskDetailsUpdate, TaskId, TaskSchedule,
        TaskStatus, VolunteeringDomainError, derive_status,
    },
    ports::{OrganizationRepository, RepositoryError, SignupRepository, TaskRepository},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Calendar dates fixed when a task is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDates {
    /// Day the event takes place.
    pub event_date: NaiveDate,
    /// Last day on which volunteers may sign up.
    pub application_deadline: NaiveDate,
    /// Last day on which volunteers may withdraw.
    pub cancellation_deadline: NaiveDate,
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    organization_id: OrganizationId,
    title: String,
    description: String,
    location: String,
    dates: TaskDates,
}

impl CreateTaskRequest {
    /// Creates a request with every required task field.
    #[must_use]
    pub fn new(
        organization_id: OrganizationId,
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        dates: TaskDates,
    ) -> Self {
        Self {
            organization_id,
            title: title.into(),
            description: description.into(),
            location: location.into(),
            dates,
        }
    }

    /// Returns the owning organization.
    #[must_use]
    pub const fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }
}

/// Request payload for editing a task's descriptive fields.
///
/// Dates cannot be changed once a task exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    update: TaskDetailsUpdate,
}

impl UpdateTaskRequest {
    /// Creates an empty update that keeps every field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.update.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.update.description = Some(description.into());
        self
    }

    /// Replaces the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.update.location = Some(location.into());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The owning organization does not exist.
    #[error("organization {0} not found")]
    OrganizationNotFound(OrganizationId),
    /// The task does not exist.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] VolunteeringDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// Dependent signups could not all be removed; the task was kept.
    #[error(transparent)]
    Cascade(#[from] CascadeError),
}

impl TaskLifecycleError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OrganizationNotFound(_) | Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::Cascade(err) => err.kind(),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<O, T, S, C>
where
    O: OrganizationRepository,
    T: TaskRepository,
    S: SignupRepository,
    C: Clock + Send + Sync,
{
    organizations: Arc<O>,
    tasks: Arc<T>,
    cascade: CascadeDeletionPolicy<T, S>,
    clock: Arc<C>,
}

impl<O, T, S, C> TaskLifecycleService<O, T, S, C>
where
    O: OrganizationRepository,
    T: TaskRepository,
    S: SignupRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(organizations: Arc<O>, tasks: Arc<T>, signups: Arc<S>, clock: Arc<C>) -> Self {
        let cascade = CascadeDeletionPolicy::new(Arc::clone(&tasks), signups);
        Self {
            organizations,
            tasks,
            cascade,
            clock,
        }
    }

    /// Creates a task and attaches it to its organization.
    ///
    /// Checks run in a fixed order and the first failure wins: the
    /// organization must exist, neither deadline may be before today,
    /// neither deadline may be after the event, and the descriptive fields
    /// must be valid.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::OrganizationNotFound`] for an unknown
    /// organization, [`TaskLifecycleError::Domain`] for invalid input, or
    /// [`TaskLifecycleError::Repository`] when storing the task or the
    /// updated organization fails. A task whose organization could not be
    /// updated is deleted again before the error is returned.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let Some(mut organization) = self
            .organizations
            .find_by_id(request.organization_id)
            .await?
        else {
            tracing::debug!(
                organization_id = %request.organization_id,
                "Rejected task for unknown organization"
            );
            return Err(TaskLifecycleError::OrganizationNotFound(
                request.organization_id,
            ));
        };

        let today = self.clock.utc().date_naive();
        let schedule = TaskSchedule::new(
            request.dates.event_date,
            request.dates.application_deadline,
            request.dates.cancellation_deadline,
            today,
        )
        .inspect_err(|err| tracing::debug!(error = %err, "Rejected task schedule"))?;
        let details = TaskDetails::new(request.title, request.description, request.location)
            .inspect_err(|err| tracing::debug!(error = %err, "Rejected task details"))?;

        let task = Task::new(organization.id(), details, schedule, &*self.clock);
        self.tasks.store(&task).await?;
        organization.attach_task(task.id(), &*self.clock);
        if let Err(err) = self.organizations.update(&organization).await {
            self.discard_unattached(&task).await;
            return Err(err.into());
        }

        tracing::info!(
            task_id = %task.id(),
            organization_id = %organization.id(),
            event_date = %task.schedule().event_date(),
            "Task created"
        );
        Ok(task)
    }

    /// Replaces the supplied descriptive fields of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for an unknown task or
    /// [`TaskLifecycleError::Domain`] when a supplied field is invalid.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        request: &UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.require_task(task_id).await?;
        task.update_details(&request.update, &*self.clock)?;
        self.tasks.update(&task).await?;
        tracing::info!(task_id = %task_id, "Task updated");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_task(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find_by_id(task_id).await?)
    }

    /// Lists every task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the listing fails.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list_all().await?)
    }

    /// Computes the current status of a stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for an unknown task.
    pub async fn task_status(&self, task_id: TaskId) -> TaskLifecycleResult<TaskStatus> {
        let task = self.require_task(task_id).await?;
        Ok(self.status_of(&task))
    }

    /// Computes the status of `task` against the service clock.
    #[must_use]
    pub fn status_of(&self, task: &Task) -> TaskStatus {
        derive_status(task, self.clock.utc())
    }

    /// Marks a task as cancelled by its organization.
    ///
    /// Cancelling twice keeps the first timestamp. Existing signups are left
    /// in place.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for an unknown task.
    pub async fn cancel_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.require_task(task_id).await?;
        if task.cancelled_at().is_some() {
            return Ok(task);
        }
        task.mark_cancelled(&*self.clock);
        self.tasks.update(&task).await?;
        tracing::info!(task_id = %task_id, "Task cancelled");
        Ok(task)
    }

    /// Deletes a task after all of its signups.
    ///
    /// The task is detached from its organization before the task row is
    /// removed, so a failed detach leaves the task stored and still listed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for an unknown task,
    /// [`TaskLifecycleError::Cascade`] when a signup could not be removed,
    /// and [`TaskLifecycleError::Repository`] when the organization update
    /// or the task delete fails. The task is kept in every error case.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskLifecycleResult<CascadeReport> {
        let task = self.require_task(task_id).await?;
        let mut report = self.cascade.cascade_delete_for_task(task_id).await?;

        let owner = self.organizations.find_by_id(task.organization_id()).await?;
        if let Some(mut organization) = owner {
            let detached = organization.detach_task(task_id, &*self.clock);
            if detached {
                self.organizations.update(&organization).await?;
            }
        }

        self.tasks.delete(task_id).await?;
        report.tasks_removed += 1;

        tracing::info!(
            task_id = %task_id,
            signups_removed = report.signups_removed,
            "Task deleted"
        );
        Ok(report)
    }

    async fn discard_unattached(&self, task: &Task) {
        match self.tasks.delete(task.id()).await {
            Ok(()) => tracing::warn!(
                task_id = %task.id(),
                organization_id = %task.organization_id(),
                "Discarded task after organization update failed"
            ),
            Err(err) => tracing::warn!(
                task_id = %task.id(),
                organization_id = %task.organization_id(),
                error = %err,
                "Task left unattached after organization update failed"
            ),
        }
    }

    async fn require_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }
}
