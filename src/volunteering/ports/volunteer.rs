//! Repository port for volunteer persistence.

use super::RepositoryResult;
use crate::volunteering::domain::{Volunteer, VolunteerId};
use async_trait::async_trait;

/// Volunteer persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteerRepository: Send + Sync {
    /// Stores a new volunteer.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::Duplicate`] when the identifier is
    /// already taken.
    async fn store(&self, volunteer: &Volunteer) -> RepositoryResult<()>;

    /// Persists changes to an existing volunteer.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::NotFound`] when the volunteer does
    /// not exist.
    async fn update(&self, volunteer: &Volunteer) -> RepositoryResult<()>;

    /// Finds a volunteer by identifier.
    ///
    /// Returns `None` when the volunteer does not exist.
    async fn find_by_id(&self, id: VolunteerId) -> RepositoryResult<Option<Volunteer>>;

    /// Returns every volunteer, oldest registration first.
    async fn list_all(&self) -> RepositoryResult<Vec<Volunteer>>;

    /// Removes a volunteer record. Signups are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::NotFound`] when the volunteer does
    /// not exist.
    async fn delete(&self, id: VolunteerId) -> RepositoryResult<()>;
}
