//! Task aggregate root with its descriptive fields and deadline schedule.

use super::{
    DeadlineKind, OrganizationId, SignupId, TaskId, TaskStatus, VolunteeringDomainError,
    contact::required_text, derive_status,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Storage limit for task titles and locations.
pub const TASK_TEXT_MAX_LEN: usize = 100;

/// Descriptive, freely editable task fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    title: String,
    description: String,
    location: String,
}

/// Partial update of task details; unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDetailsUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement location.
    pub location: Option<String>,
}

impl TaskDetails {
    /// Creates validated task details.
    ///
    /// # Errors
    ///
    /// Returns [`VolunteeringDomainError::EmptyField`] for blank fields and
    /// [`VolunteeringDomainError::FieldTooLong`] when the title or location
    /// exceeds [`TASK_TEXT_MAX_LEN`].
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self, VolunteeringDomainError> {
        Ok(Self {
            title: required_text("title", title, Some(TASK_TEXT_MAX_LEN))?,
            description: required_text("description", description, None)?,
            location: required_text("location", location, Some(TASK_TEXT_MAX_LEN))?,
        })
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns a copy with the supplied fields replaced.
    ///
    /// # Errors
    ///
    /// Returns a validation error when any supplied field is invalid.
    pub fn merged(&self, update: &TaskDetailsUpdate) -> Result<Self, VolunteeringDomainError> {
        Self::new(
            update.title.clone().unwrap_or_else(|| self.title.clone()),
            update
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            update
                .location
                .clone()
                .unwrap_or_else(|| self.location.clone()),
        )
    }
}

/// Event date and the two signup deadlines. Fixed once the task exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSchedule {
    event_date: NaiveDate,
    application_deadline: NaiveDate,
    cancellation_deadline: NaiveDate,
}

impl TaskSchedule {
    /// Validates a schedule for a task being created on `today`.
    ///
    /// Past deadlines are reported before ordering problems, and the
    /// application deadline before the cancellation deadline.
    ///
    /// # Errors
    ///
    /// Returns [`VolunteeringDomainError::DeadlineInPast`] when a deadline is
    /// before `today`, or [`VolunteeringDomainError::DeadlineAfterEvent`] when
    /// a deadline is after `event_date`.
    pub fn new(
        event_date: NaiveDate,
        application_deadline: NaiveDate,
        cancellation_deadline: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, VolunteeringDomainError> {
        let deadlines = [
            (DeadlineKind::Application, application_deadline),
            (DeadlineKind::Cancellation, cancellation_deadline),
        ];

        for (kind, deadline) in deadlines {
            if deadline < today {
                return Err(VolunteeringDomainError::DeadlineInPast {
                    kind,
                    deadline,
                    today,
                });
            }
        }

        for (kind, deadline) in deadlines {
            if deadline > event_date {
                return Err(VolunteeringDomainError::DeadlineAfterEvent {
                    kind,
                    deadline,
                    event_date,
                });
            }
        }

        Ok(Self {
            event_date,
            application_deadline,
            cancellation_deadline,
        })
    }

    /// Reconstructs a schedule from storage without re-checking it against
    /// the current date.
    #[must_use]
    pub const fn from_persisted(
        event_date: NaiveDate,
        application_deadline: NaiveDate,
        cancellation_deadline: NaiveDate,
    ) -> Self {
        Self {
            event_date,
            application_deadline,
            cancellation_deadline,
        }
    }

    /// Returns the event date.
    #[must_use]
    pub const fn event_date(&self) -> NaiveDate {
        self.event_date
    }

    /// Returns the application deadline.
    #[must_use]
    pub const fn application_deadline(&self) -> NaiveDate {
        self.application_deadline
    }

    /// Returns the cancellation deadline.
    #[must_use]
    pub const fn cancellation_deadline(&self) -> NaiveDate {
        self.cancellation_deadline
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    organization_id: OrganizationId,
    details: TaskDetails,
    schedule: TaskSchedule,
    cancelled_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted identifier.
    pub id: TaskId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Persisted descriptive fields.
    pub details: TaskDetails,
    /// Persisted schedule.
    pub schedule: TaskSchedule,
    /// Administrative cancellation marker, if set.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task owned by `organization_id`.
    #[must_use]
    pub fn new(
        organization_id: OrganizationId,
        details: TaskDetails,
        schedule: TaskSchedule,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            organization_id,
            details,
            schedule,
            cancelled_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            organization_id: data.organization_id,
            details: data.details,
            schedule: data.schedule,
            cancelled_at: data.cancelled_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning organization.
    #[must_use]
    pub const fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the event date and deadlines.
    #[must_use]
    pub const fn schedule(&self) -> &TaskSchedule {
        &self.schedule
    }

    /// Returns when the task was administratively cancelled, if it was.
    #[must_use]
    pub const fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.cancelled_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Computes the status as of `now`.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> TaskStatus {
        derive_status(self, now)
    }

    /// Replaces the supplied descriptive fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error when any supplied field is invalid; the
    /// task is left untouched in that case.
    pub fn update_details(
        &mut self,
        update: &TaskDetailsUpdate,
        clock: &impl Clock,
    ) -> Result<(), VolunteeringDomainError> {
        self.details = self.details.merged(update)?;
        self.touch(clock);
        Ok(())
    }

    /// Marks the task as cancelled. The first cancellation time is kept.
    pub fn mark_cancelled(&mut self, clock: &impl Clock) {
        if self.cancelled_at.is_some() {
            return;
        }
        let timestamp = clock.utc();
        self.cancelled_at = Some(timestamp);
        self.updated_at = timestamp;
    }

    /// Checks that new signups are still accepted on the date of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`VolunteeringDomainError::ApplicationDeadlinePassed`] when
    /// the application deadline lies before `now`'s date.
    pub fn ensure_accepting_signups(
        &self,
        now: DateTime<Utc>,
    ) -> Result<(), VolunteeringDomainError> {
        let deadline = self.schedule.application_deadline;
        if now.date_naive() > deadline {
            return Err(VolunteeringDomainError::ApplicationDeadlinePassed {
                task_id: self.id,
                deadline,
            });
        }
        Ok(())
    }

    /// Checks that `signup_id` may still be withdrawn on the date of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`VolunteeringDomainError::CancellationDeadlinePassed`] when
    /// the cancellation deadline lies before `now`'s date.
    pub fn ensure_cancellable(
        &self,
        signup_id: SignupId,
        now: DateTime<Utc>,
    ) -> Result<(), VolunteeringDomainError> {
        let deadline = self.schedule.cancellation_deadline;
        if now.date_naive() > deadline {
            return Err(VolunteeringDomainError::CancellationDeadlinePassed {
                signup_id,
                deadline,
            });
        }
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
