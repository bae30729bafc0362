//! Diesel row models and their mapping to domain aggregates.

use super::schema::{organizations, task_signups, tasks, volunteers};
use crate::volunteering::{
    domain::{
        ContactDetails, Gender, Organization, OrganizationId, PersistedOrganizationData,
        PersistedTaskData, PersistedVolunteerData, SignupId, Task, TaskDetails, TaskId,
        TaskSchedule, TaskSignup, Volunteer, VolunteerId,
    },
    ports::{RepositoryError, RepositoryResult},
};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Row model for organization records.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrganizationRow {
    /// Organization identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Postal address.
    pub address: String,
    /// Website.
    pub website: String,
    /// Owned task identifiers in attachment order.
    pub task_ids: Vec<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl OrganizationRow {
    /// Builds a row from the domain aggregate.
    #[must_use]
    pub fn from_domain(organization: &Organization) -> Self {
        let contact = organization.contact();
        Self {
            id: organization.id().into_inner(),
            name: contact.name().to_owned(),
            email: contact.email().to_owned(),
            phone_number: contact.phone_number().to_owned(),
            address: organization.address().to_owned(),
            website: organization.website().to_owned(),
            task_ids: organization
                .task_ids()
                .iter()
                .map(|task_id| task_id.into_inner())
                .collect(),
            created_at: organization.created_at(),
            updated_at: organization.updated_at(),
        }
    }

    /// Reconstructs the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidPersistedData`] when stored contact
    /// fields no longer pass validation.
    pub fn into_domain(self) -> RepositoryResult<Organization> {
        let contact = ContactDetails::new(self.name, self.email, self.phone_number)
            .map_err(RepositoryError::invalid_persisted_data)?;
        Ok(Organization::from_persisted(PersistedOrganizationData {
            id: OrganizationId::from_uuid(self.id),
            contact,
            address: self.address,
            website: self.website,
            task_ids: self.task_ids.into_iter().map(TaskId::from_uuid).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }))
    }
}

/// Row model for volunteer records.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = volunteers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VolunteerRow {
    /// Volunteer identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Declared gender in storage form.
    pub gender: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl VolunteerRow {
    /// Builds a row from the domain aggregate.
    #[must_use]
    pub fn from_domain(volunteer: &Volunteer) -> Self {
        let contact = volunteer.contact();
        Self {
            id: volunteer.id().into_inner(),
            name: contact.name().to_owned(),
            email: contact.email().to_owned(),
            phone_number: contact.phone_number().to_owned(),
            gender: volunteer.gender().as_str().to_owned(),
            created_at: volunteer.created_at(),
            updated_at: volunteer.updated_at(),
        }
    }

    /// Reconstructs the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidPersistedData`] when the stored
    /// gender is unknown or contact fields no longer pass validation.
    pub fn into_domain(self) -> RepositoryResult<Volunteer> {
        let gender = Gender::try_from(self.gender.as_str())
            .map_err(RepositoryError::invalid_persisted_data)?;
        let contact = ContactDetails::new(self.name, self.email, self.phone_number)
            .map_err(RepositoryError::invalid_persisted_data)?;
        Ok(Volunteer::from_persisted(PersistedVolunteerData {
            id: VolunteerId::from_uuid(self.id),
            contact,
            gender,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }))
    }
}

/// Row model for task records.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Location.
    pub location: String,
    /// Event date.
    pub event_date: NaiveDate,
    /// Last day to sign up.
    pub application_deadline: NaiveDate,
    /// Last day to withdraw a signup.
    pub cancellation_deadline: NaiveDate,
    /// Administrative cancellation time.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskRow {
    /// Builds a row from the domain aggregate.
    #[must_use]
    pub fn from_domain(task: &Task) -> Self {
        let details = task.details();
        let schedule = task.schedule();
        Self {
            id: task.id().into_inner(),
            organization_id: task.organization_id().into_inner(),
            title: details.title().to_owned(),
            description: details.description().to_owned(),
            location: details.location().to_owned(),
            event_date: schedule.event_date(),
            application_deadline: schedule.application_deadline(),
            cancellation_deadline: schedule.cancellation_deadline(),
            cancelled_at: task.cancelled_at(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }

    /// Reconstructs the domain aggregate.
    ///
    /// The schedule is taken as stored: deadlines that have since passed are
    /// expected for existing tasks.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidPersistedData`] when stored
    /// descriptive fields no longer pass validation.
    pub fn into_domain(self) -> RepositoryResult<Task> {
        let details = TaskDetails::new(self.title, self.description, self.location)
            .map_err(RepositoryError::invalid_persisted_data)?;
        Ok(Task::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(self.id),
            organization_id: OrganizationId::from_uuid(self.organization_id),
            details,
            schedule: TaskSchedule::from_persisted(
                self.event_date,
                self.application_deadline,
                self.cancellation_deadline,
            ),
            cancelled_at: self.cancelled_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }))
    }
}

/// Row model for signup records.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_signups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SignupRow {
    /// Signup identifier.
    pub id: Uuid,
    /// Task signed up for.
    pub task_id: Uuid,
    /// Volunteer who signed up.
    pub volunteer_id: Uuid,
    /// Signup timestamp.
    pub signup_date: DateTime<Utc>,
}

impl SignupRow {
    /// Builds a row from the domain record.
    #[must_use]
    pub fn from_domain(signup: &TaskSignup) -> Self {
        Self {
            id: signup.id().into_inner(),
            task_id: signup.task_id().into_inner(),
            volunteer_id: signup.volunteer_id().into_inner(),
            signup_date: signup.signup_date(),
        }
    }

    /// Reconstructs the domain record.
    #[must_use]
    pub fn into_domain(self) -> TaskSignup {
        TaskSignup::from_persisted(
            SignupId::from_uuid(self.id),
            TaskId::from_uuid(self.task_id),
            VolunteerId::from_uuid(self.volunteer_id),
            self.signup_date,
        )
    }
}
