//! Service layer coordinating volunteer signups.
//!
//! Joining is gated by a task's application deadline and leaving by its
//! cancellation deadline. Signing up twice is idempotent.

use crate::volunteering::{
    domain::{
        ErrorKind, SignupId, SignupOutcome, Task, TaskId, TaskSignup, VolunteerId,
        VolunteeringDomainError,
    },
    ports::{RepositoryError, SignupRepository, TaskRepository, VolunteerRepository},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for signup operations.
#[derive(Debug, Error)]
pub enum SignupError {
    /// The task does not exist.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// The volunteer does not exist.
    #[error("volunteer {0} not found")]
    VolunteerNotFound(VolunteerId),
    /// No signup has the given identifier.
    #[error("signup {0} not found")]
    SignupNotFound(SignupId),
    /// The volunteer holds no signup for the task.
    #[error("volunteer {volunteer_id} is not signed up for task {task_id}")]
    NotSignedUp {
        /// Task looked up.
        task_id: TaskId,
        /// Volunteer looked up.
        volunteer_id: VolunteerId,
    },
    /// A deadline or input check failed.
    #[error(transparent)]
    Domain(#[from] VolunteeringDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl SignupError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_)
            | Self::VolunteerNotFound(_)
            | Self::SignupNotFound(_)
            | Self::NotSignedUp { .. } => ErrorKind::NotFound,
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for signup operations.
pub type SignupResult<T> = Result<T, SignupError>;

/// Coordinates signup creation, withdrawal and lookups.
#[derive(Clone)]
pub struct SignupCoordinator<T, V, S, C>
where
    T: TaskRepository,
    V: VolunteerRepository,
    S: SignupRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    volunteers: Arc<V>,
    signups: Arc<S>,
    clock: Arc<C>,
}

impl<T, V, S, C> SignupCoordinator<T, V, S, C>
where
    T: TaskRepository,
    V: VolunteerRepository,
    S: SignupRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new signup coordinator.
    #[must_use]
    pub const fn new(tasks: Arc<T>, volunteers: Arc<V>, signups: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            volunteers,
            signups,
            clock,
        }
    }

    /// Signs a volunteer up for a task.
    ///
    /// Returns [`SignupOutcome::AlreadyExists`] with the stored record when
    /// the volunteer is already signed up, including when a concurrent
    /// request won the insert.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::TaskNotFound`] or
    /// [`SignupError::VolunteerNotFound`] for unknown references and
    /// [`VolunteeringDomainError::ApplicationDeadlinePassed`] once the
    /// application deadline is behind today.
    pub async fn sign_up(
        &self,
        task_id: TaskId,
        volunteer_id: VolunteerId,
    ) -> SignupResult<SignupOutcome> {
        let task = self.require_task(task_id).await?;
        if self.volunteers.find_by_id(volunteer_id).await?.is_none() {
            return Err(SignupError::VolunteerNotFound(volunteer_id));
        }

        task.ensure_accepting_signups(self.clock.utc())
            .inspect_err(|err| tracing::debug!(error = %err, "Rejected signup"))?;

        if let Some(existing) = self
            .signups
            .find_by_task_and_volunteer(task_id, volunteer_id)
            .await?
        {
            return Ok(SignupOutcome::AlreadyExists(existing));
        }

        let signup = TaskSignup::new(task_id, volunteer_id, &*self.clock);
        match self.signups.store(&signup).await {
            Ok(()) => {
                tracing::info!(
                    signup_id = %signup.id(),
                    task_id = %task_id,
                    volunteer_id = %volunteer_id,
                    "Volunteer signed up"
                );
                Ok(SignupOutcome::Created(signup))
            }
            Err(err @ RepositoryError::DuplicateSignup { .. }) => {
                tracing::warn!(
                    task_id = %task_id,
                    volunteer_id = %volunteer_id,
                    "Concurrent signup detected by the store"
                );
                self.signups
                    .find_by_task_and_volunteer(task_id, volunteer_id)
                    .await?
                    .map(SignupOutcome::AlreadyExists)
                    .ok_or(SignupError::Repository(err))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Withdraws a volunteer from a task.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::NotSignedUp`] when there is nothing to
    /// withdraw and [`VolunteeringDomainError::CancellationDeadlinePassed`]
    /// once the cancellation deadline is behind today.
    pub async fn cancel_signup(
        &self,
        task_id: TaskId,
        volunteer_id: VolunteerId,
    ) -> SignupResult<TaskSignup> {
        let signup = self
            .signups
            .find_by_task_and_volunteer(task_id, volunteer_id)
            .await?
            .ok_or(SignupError::NotSignedUp {
                task_id,
                volunteer_id,
            })?;
        self.withdraw(signup).await
    }

    /// Withdraws a signup by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::SignupNotFound`] for an unknown signup and
    /// [`VolunteeringDomainError::CancellationDeadlinePassed`] once the
    /// cancellation deadline is behind today.
    pub async fn cancel_signup_by_id(&self, signup_id: SignupId) -> SignupResult<TaskSignup> {
        let signup = self
            .signups
            .find_by_id(signup_id)
            .await?
            .ok_or(SignupError::SignupNotFound(signup_id))?;
        self.withdraw(signup).await
    }

    /// Returns the signups for a task, earliest first.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::TaskNotFound`] for an unknown task.
    pub async fn signups_for_task(&self, task_id: TaskId) -> SignupResult<Vec<TaskSignup>> {
        self.require_task(task_id).await?;
        Ok(self.signups.find_by_task(task_id).await?)
    }

    /// Returns the signups held by a volunteer, earliest first.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::VolunteerNotFound`] for an unknown volunteer.
    pub async fn signups_for_volunteer(
        &self,
        volunteer_id: VolunteerId,
    ) -> SignupResult<Vec<TaskSignup>> {
        if self.volunteers.find_by_id(volunteer_id).await?.is_none() {
            return Err(SignupError::VolunteerNotFound(volunteer_id));
        }
        Ok(self.signups.find_by_volunteer(volunteer_id).await?)
    }

    /// Returns every signup, earliest first.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::Repository`] when the listing fails.
    pub async fn all_signups(&self) -> SignupResult<Vec<TaskSignup>> {
        Ok(self.signups.list_all().await?)
    }

    /// Looks up a signup by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::Repository`] when the lookup fails.
    pub async fn find_signup(&self, signup_id: SignupId) -> SignupResult<Option<TaskSignup>> {
        Ok(self.signups.find_by_id(signup_id).await?)
    }

    /// Returns signups created within `start..=end`, earliest first.
    ///
    /// # Errors
    ///
    /// Returns [`VolunteeringDomainError::InvalidDateRange`] when `start` is
    /// after `end`.
    pub async fn signups_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SignupResult<Vec<TaskSignup>> {
        if start > end {
            return Err(VolunteeringDomainError::InvalidDateRange { start, end }.into());
        }
        Ok(self.signups.find_by_signup_date_between(start, end).await?)
    }

    async fn withdraw(&self, signup: TaskSignup) -> SignupResult<TaskSignup> {
        let task = self.require_task(signup.task_id()).await?;
        task.ensure_cancellable(signup.id(), self.clock.utc())
            .inspect_err(|err| tracing::debug!(error = %err, "Rejected signup withdrawal"))?;
        self.signups.delete(signup.id()).await?;
        tracing::info!(
            signup_id = %signup.id(),
            task_id = %signup.task_id(),
            volunteer_id = %signup.volunteer_id(),
            "Signup withdrawn"
        );
        Ok(signup)
    }

    async fn require_task(&self, task_id: TaskId) -> SignupResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(SignupError::TaskNotFound(task_id))
    }
}
