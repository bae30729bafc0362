//! Service layer for organization and volunteer records.
//!
//! Deleting either kind of record removes its dependants first through
//! [`CascadeDeletionPolicy`].

use super::cascade::{CascadeDeletionPolicy, CascadeError, CascadeReport};
use crate::volunteering::{
    domain::{
        ContactDetails, ErrorKind, Gender, Organization, OrganizationId, OrganizationUpdate,
        Task, Volunteer, VolunteerId, VolunteerUpdate, VolunteeringDomainError,
    },
    ports::{
        OrganizationRepository, RepositoryError, SignupRepository, TaskRepository,
        VolunteerRepository,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Contact fields shared by both registration requests.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ContactFields {
    name: String,
    email: String,
    phone_number: String,
}

impl ContactFields {
    fn into_details(self) -> Result<ContactDetails, VolunteeringDomainError> {
        ContactDetails::new(self.name, self.email, self.phone_number)
    }
}

/// Request payload for registering an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOrganizationRequest {
    contact: ContactFields,
    address: String,
    website: String,
}

impl RegisterOrganizationRequest {
    /// Creates a request with every required organization field.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        address: impl Into<String>,
        website: impl Into<String>,
    ) -> Self {
        Self {
            contact: ContactFields {
                name: name.into(),
                email: email.into(),
                phone_number: phone_number.into(),
            },
            address: address.into(),
            website: website.into(),
        }
    }
}

/// Request payload for registering a volunteer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterVolunteerRequest {
    contact: ContactFields,
    gender: Gender,
}

impl RegisterVolunteerRequest {
    /// Creates a request; gender defaults to [`Gender::Undisclosed`].
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            contact: ContactFields {
                name: name.into(),
                email: email.into(),
                phone_number: phone_number.into(),
            },
            gender: Gender::Undisclosed,
        }
    }

    /// Sets the declared gender.
    #[must_use]
    pub const fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }
}

/// Service-level errors for directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The organization does not exist.
    #[error("organization {0} not found")]
    OrganizationNotFound(OrganizationId),
    /// The volunteer does not exist.
    #[error("volunteer {0} not found")]
    VolunteerNotFound(VolunteerId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] VolunteeringDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// Dependants could not all be removed; the record was kept.
    #[error(transparent)]
    Cascade(#[from] CascadeError),
}

impl DirectoryError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OrganizationNotFound(_) | Self::VolunteerNotFound(_) => ErrorKind::NotFound,
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::Cascade(err) => err.kind(),
        }
    }
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Registration and maintenance of organizations and volunteers.
#[derive(Clone)]
pub struct DirectoryService<O, V, T, S, C>
where
    O: OrganizationRepository,
    V: VolunteerRepository,
    T: TaskRepository,
    S: SignupRepository,
    C: Clock + Send + Sync,
{
    organizations: Arc<O>,
    volunteers: Arc<V>,
    tasks: Arc<T>,
    cascade: CascadeDeletionPolicy<T, S>,
    clock: Arc<C>,
}

impl<O, V, T, S, C> DirectoryService<O, V, T, S, C>
where
    O: OrganizationRepository,
    V: VolunteerRepository,
    T: TaskRepository,
    S: SignupRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new directory service.
    #[must_use]
    pub fn new(
        organizations: Arc<O>,
        volunteers: Arc<V>,
        tasks: Arc<T>,
        signups: Arc<S>,
        clock: Arc<C>,
    ) -> Self {
        let cascade = CascadeDeletionPolicy::new(Arc::clone(&tasks), signups);
        Self {
            organizations,
            volunteers,
            tasks,
            cascade,
            clock,
        }
    }

    /// Registers an organization with no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Domain`] for invalid fields.
    pub async fn register_organization(
        &self,
        request: RegisterOrganizationRequest,
    ) -> DirectoryResult<Organization> {
        let contact = request.contact.into_details()?;
        let organization =
            Organization::new(contact, request.address, request.website, &*self.clock)?;
        self.organizations.store(&organization).await?;
        tracing::info!(organization_id = %organization.id(), "Organization registered");
        Ok(organization)
    }

    /// Applies a partial update to an organization.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::OrganizationNotFound`] for an unknown
    /// organization or [`DirectoryError::Domain`] for invalid fields.
    pub async fn update_organization(
        &self,
        organization_id: OrganizationId,
        update: &OrganizationUpdate,
    ) -> DirectoryResult<Organization> {
        let mut organization = self.require_organization(organization_id).await?;
        organization.apply_update(update, &*self.clock)?;
        self.organizations.update(&organization).await?;
        tracing::info!(organization_id = %organization_id, "Organization updated");
        Ok(organization)
    }

    /// Looks up an organization.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Repository`] when the lookup fails.
    pub async fn find_organization(
        &self,
        organization_id: OrganizationId,
    ) -> DirectoryResult<Option<Organization>> {
        Ok(self.organizations.find_by_id(organization_id).await?)
    }

    /// Lists every organization, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Repository`] when the listing fails.
    pub async fn list_organizations(&self) -> DirectoryResult<Vec<Organization>> {
        Ok(self.organizations.list_all().await?)
    }

    /// Returns the tasks an organization owns, in collection order.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::OrganizationNotFound`] for an unknown
    /// organization.
    pub async fn organization_tasks(
        &self,
        organization_id: OrganizationId,
    ) -> DirectoryResult<Vec<Task>> {
        let organization = self.require_organization(organization_id).await?;
        let mut owned = Vec::with_capacity(organization.task_ids().len());
        for &task_id in organization.task_ids() {
            if let Some(task) = self.tasks.find_by_id(task_id).await? {
                owned.push(task);
            }
        }
        Ok(owned)
    }

    /// Deletes an organization after its tasks and their signups.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::OrganizationNotFound`] for an unknown
    /// organization and [`DirectoryError::Cascade`] when a dependant could
    /// not be removed; the organization is kept in that case.
    pub async fn delete_organization(
        &self,
        organization_id: OrganizationId,
    ) -> DirectoryResult<CascadeReport> {
        let organization = self.require_organization(organization_id).await?;
        let report = self
            .cascade
            .cascade_delete_for_organization(&organization)
            .await?;
        self.organizations.delete(organization_id).await?;
        tracing::info!(
            organization_id = %organization_id,
            tasks_removed = report.tasks_removed,
            signups_removed = report.signups_removed,
            "Organization deleted"
        );
        Ok(report)
    }

    /// Registers a volunteer.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Domain`] for invalid contact fields.
    pub async fn register_volunteer(
        &self,
        request: RegisterVolunteerRequest,
    ) -> DirectoryResult<Volunteer> {
        let contact = request.contact.into_details()?;
        let volunteer = Volunteer::new(contact, request.gender, &*self.clock);
        self.volunteers.store(&volunteer).await?;
        tracing::info!(volunteer_id = %volunteer.id(), "Volunteer registered");
        Ok(volunteer)
    }

    /// Applies a partial contact update to a volunteer.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::VolunteerNotFound`] for an unknown
    /// volunteer or [`DirectoryError::Domain`] for invalid fields.
    pub async fn update_volunteer(
        &self,
        volunteer_id: VolunteerId,
        update: &VolunteerUpdate,
    ) -> DirectoryResult<Volunteer> {
        let mut volunteer = self.require_volunteer(volunteer_id).await?;
        volunteer.apply_update(update, &*self.clock)?;
        self.volunteers.update(&volunteer).await?;
        tracing::info!(volunteer_id = %volunteer_id, "Volunteer updated");
        Ok(volunteer)
    }

    /// Looks up a volunteer.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Repository`] when the lookup fails.
    pub async fn find_volunteer(
        &self,
        volunteer_id: VolunteerId,
    ) -> DirectoryResult<Option<Volunteer>> {
        Ok(self.volunteers.find_by_id(volunteer_id).await?)
    }

    /// Lists every volunteer, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Repository`] when the listing fails.
    pub async fn list_volunteers(&self) -> DirectoryResult<Vec<Volunteer>> {
        Ok(self.volunteers.list_all().await?)
    }

    /// Deletes a volunteer after all of their signups, ignoring deadlines.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::VolunteerNotFound`] for an unknown
    /// volunteer and [`DirectoryError::Cascade`] when a signup could not be
    /// removed; the volunteer is kept in that case.
    pub async fn delete_volunteer(
        &self,
        volunteer_id: VolunteerId,
    ) -> DirectoryResult<CascadeReport> {
        self.require_volunteer(volunteer_id).await?;
        let report = self.cascade.cascade_delete_for_volunteer(volunteer_id).await?;
        self.volunteers.delete(volunteer_id).await?;
        tracing::info!(
            volunteer_id = %volunteer_id,
            signups_removed = report.signups_removed,
            "Volunteer deleted"
        );
        Ok(report)
    }

    async fn require_organization(
        &self,
        organization_id: OrganizationId,
    ) -> DirectoryResult<Organization> {
        self.organizations
            .find_by_id(organization_id)
            .await?
            .ok_or(DirectoryError::OrganizationNotFound(organization_id))
    }

    async fn require_volunteer(&self, volunteer_id: VolunteerId) -> DirectoryResult<Volunteer> {
        self.volunteers
            .find_by_id(volunteer_id)
            .await?
            .ok_or(DirectoryError::VolunteerNotFound(volunteer_id))
    }
}
