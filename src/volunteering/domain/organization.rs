//! Organization aggregate: contact data plus the ordered list of tasks it owns.

use super::{
    ContactDetails, ContactUpdate, OrganizationId, TaskId, VolunteeringDomainError,
    contact::required_text,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Storage limit for addresses and websites.
pub const ORGANIZATION_TEXT_MAX_LEN: usize = 255;

/// An organization that posts volunteering tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    id: OrganizationId,
    contact: ContactDetails,
    address: String,
    website: String,
    task_ids: Vec<TaskId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedOrganizationData {
    /// Persisted identifier.
    pub id: OrganizationId,
    /// Persisted contact details.
    pub contact: ContactDetails,
    /// Persisted postal address.
    pub address: String,
    /// Persisted website.
    pub website: String,
    /// Owned tasks in the order they were attached.
    pub task_ids: Vec<TaskId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update of an organization; unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationUpdate {
    /// Contact fields to replace.
    pub contact: ContactUpdate,
    /// Replacement postal address.
    pub address: Option<String>,
    /// Replacement website.
    pub website: Option<String>,
}

impl Organization {
    /// Registers a new organization without any tasks.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the address or website is blank or
    /// longer than [`ORGANIZATION_TEXT_MAX_LEN`].
    pub fn new(
        contact: ContactDetails,
        address: impl Into<String>,
        website: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, VolunteeringDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: OrganizationId::new(),
            contact,
            address: required_text("address", address, Some(ORGANIZATION_TEXT_MAX_LEN))?,
            website: required_text("website", website, Some(ORGANIZATION_TEXT_MAX_LEN))?,
            task_ids: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an organization from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedOrganizationData) -> Self {
        Self {
            id: data.id,
            contact: data.contact,
            address: data.address,
            website: data.website,
            task_ids: data.task_ids,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the organization identifier.
    #[must_use]
    pub const fn id(&self) -> OrganizationId {
        self.id
    }

    /// Returns the contact details.
    #[must_use]
    pub const fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    /// Returns the postal address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the website.
    #[must_use]
    pub fn website(&self) -> &str {
        &self.website
    }

    /// Returns owned task identifiers in attachment order.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
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

    /// Applies a partial update.
    ///
    /// Validation happens before any field is written, so a rejected update
    /// leaves the organization untouched.
    ///
    /// # Errors
    ///
    /// Returns a validation error when any supplied field is invalid.
    pub fn apply_update(
        &mut self,
        update: &OrganizationUpdate,
        clock: &impl Clock,
    ) -> Result<(), VolunteeringDomainError> {
        let contact = self.contact.merged(&update.contact)?;
        let address = match &update.address {
            Some(value) => {
                required_text("address", value.as_str(), Some(ORGANIZATION_TEXT_MAX_LEN))?
            }
            None => self.address.clone(),
        };
        let website = match &update.website {
            Some(value) => {
                required_text("website", value.as_str(), Some(ORGANIZATION_TEXT_MAX_LEN))?
            }
            None => self.website.clone(),
        };

        self.contact = contact;
        self.address = address;
        self.website = website;
        self.touch(clock);
        Ok(())
    }

    /// Appends a task to the owned collection. Attaching an already owned
    /// task is a no-op.
    pub fn attach_task(&mut self, task_id: TaskId, clock: &impl Clock) {
        if self.task_ids.contains(&task_id) {
            return;
        }
        self.task_ids.push(task_id);
        self.touch(clock);
    }

    /// Removes a task from the owned collection.
    ///
    /// Returns `true` when the task was owned.
    pub fn detach_task(&mut self, task_id: TaskId, clock: &impl Clock) -> bool {
        let before = self.task_ids.len();
        self.task_ids.retain(|owned| *owned != task_id);
        let removed = self.task_ids.len() != before;
        if removed {
            self.touch(clock);
        }
        removed
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
