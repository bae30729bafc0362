//! Volunteer aggregate.

use super::{ContactDetails, ContactUpdate, ParseGenderError, VolunteerId, VolunteeringDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-declared gender of a volunteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Female.
    Female,
    /// Male.
    Male,
    /// Non-binary.
    NonBinary,
    /// Not disclosed.
    Undisclosed,
}

impl Gender {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::NonBinary => "non_binary",
            Self::Undisclosed => "undisclosed",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Gender {
    type Error = ParseGenderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "female" => Ok(Self::Female),
            "male" => Ok(Self::Male),
            "non_binary" => Ok(Self::NonBinary),
            "undisclosed" => Ok(Self::Undisclosed),
            _ => Err(ParseGenderError(value.to_owned())),
        }
    }
}

/// A person who signs up for tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    id: VolunteerId,
    contact: ContactDetails,
    gender: Gender,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted volunteer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedVolunteerData {
    /// Persisted identifier.
    pub id: VolunteerId,
    /// Persisted contact details.
    pub contact: ContactDetails,
    /// Persisted gender.
    pub gender: Gender,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Volunteer {
    /// Registers a new volunteer.
    #[must_use]
    pub fn new(contact: ContactDetails, gender: Gender, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: VolunteerId::new(),
            contact,
            gender,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a volunteer from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedVolunteerData) -> Self {
        Self {
            id: data.id,
            contact: data.contact,
            gender: data.gender,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the volunteer identifier.
    #[must_use]
    pub const fn id(&self) -> VolunteerId {
        self.id
    }

    /// Returns the contact details.
    #[must_use]
    pub const fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    /// Returns the declared gender.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
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

    /// Applies a partial contact update.
    ///
    /// # Errors
    ///
    /// Returns a validation error when any supplied field is invalid; the
    /// volunteer is left untouched in that case.
    pub fn apply_update(
        &mut self,
        update: &ContactUpdate,
        clock: &impl Clock,
    ) -> Result<(), VolunteeringDomainError> {
        self.contact = self.contact.merged(update)?;
        self.updated_at = clock.utc();
        Ok(())
    }
}

/// Partial update of a volunteer's contact fields.
pub type VolunteerUpdate = ContactUpdate;
