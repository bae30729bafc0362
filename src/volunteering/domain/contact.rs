//! Contact details shared by organizations and volunteers, plus the text
//! field checks used across the domain.

use super::VolunteeringDomainError;
use serde::{Deserialize, Serialize};

/// Storage limit for person and organization names.
pub const NAME_MAX_LEN: usize = 100;

/// Storage limit for phone numbers.
pub const PHONE_NUMBER_MAX_LEN: usize = 15;

/// Trims `value` and rejects it when blank or longer than `max` characters.
pub(crate) fn required_text(
    field: &'static str,
    value: impl Into<String>,
    max: Option<usize>,
) -> Result<String, VolunteeringDomainError> {
    let raw = value.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(VolunteeringDomainError::EmptyField(field));
    }
    if let Some(limit) = max {
        let actual = trimmed.chars().count();
        if actual > limit {
            return Err(VolunteeringDomainError::FieldTooLong {
                field,
                max: limit,
                actual,
            });
        }
    }
    Ok(trimmed.to_owned())
}

/// Validated contact information for a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    name: String,
    email: String,
    phone_number: String,
}

impl ContactDetails {
    /// Creates validated contact details.
    ///
    /// # Errors
    ///
    /// Returns [`VolunteeringDomainError::EmptyField`] when a field is blank
    /// or [`VolunteeringDomainError::FieldTooLong`] when the name or phone
    /// number exceeds its storage limit.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<Self, VolunteeringDomainError> {
        Ok(Self {
            name: required_text("name", name, Some(NAME_MAX_LEN))?,
            email: required_text("email", email, None)?,
            phone_number: required_text(
                "phone number",
                phone_number,
                Some(PHONE_NUMBER_MAX_LEN),
            )?,
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Returns a copy with the supplied fields replaced, keeping the rest.
    ///
    /// # Errors
    ///
    /// Returns a validation error when any supplied field is invalid.
    pub fn merged(&self, update: &ContactUpdate) -> Result<Self, VolunteeringDomainError> {
        Self::new(
            update.name.clone().unwrap_or_else(|| self.name.clone()),
            update.email.clone().unwrap_or_else(|| self.email.clone()),
            update
                .phone_number
                .clone()
                .unwrap_or_else(|| self.phone_number.clone()),
        )
    }
}

/// Partial update of contact details; unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement email address.
    pub email: Option<String>,
    /// Replacement phone number.
    pub phone_number: Option<String>,
}
