//! Repository port for organization persistence.

use super::RepositoryResult;
use crate::volunteering::domain::{Organization, OrganizationId};
use async_trait::async_trait;

/// Organization persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Stores a new organization.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::Duplicate`] when the identifier is
    /// already taken.
    async fn store(&self, organization: &Organization) -> RepositoryResult<()>;

    /// Persists changes to an existing organization, including its owned task
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::NotFound`] when the organization does
    /// not exist.
    async fn update(&self, organization: &Organization) -> RepositoryResult<()>;

    /// Finds an organization by identifier.
    ///
    /// Returns `None` when the organization does not exist.
    async fn find_by_id(&self, id: OrganizationId) -> RepositoryResult<Option<Organization>>;

    /// Returns every organization, oldest registration first.
    async fn list_all(&self) -> RepositoryResult<Vec<Organization>>;

    /// Removes an organization record. Owned tasks are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError::NotFound`] when the organization does
    /// not exist.
    async fn delete(&self, id: OrganizationId) -> RepositoryResult<()>;
}
