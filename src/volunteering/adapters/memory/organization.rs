//! In-memory organization repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::lock_poisoned;
use crate::volunteering::{
    domain::{Organization, OrganizationId},
    ports::{EntityRef, OrganizationRepository, RepositoryError, RepositoryResult},
};

/// Thread-safe in-memory organization repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrganizationRepository {
    organizations: Arc<RwLock<HashMap<OrganizationId, Organization>>>,
}

impl InMemoryOrganizationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn store(&self, organization: &Organization) -> RepositoryResult<()> {
        let mut organizations = self.organizations.write().map_err(lock_poisoned)?;
        if organizations.contains_key(&organization.id()) {
            return Err(RepositoryError::Duplicate(EntityRef::Organization(
                organization.id(),
            )));
        }
        organizations.insert(organization.id(), organization.clone());
        Ok(())
    }

    async fn update(&self, organization: &Organization) -> RepositoryResult<()> {
        let mut organizations = self.organizations.write().map_err(lock_poisoned)?;
        let slot = organizations
            .get_mut(&organization.id())
            .ok_or(RepositoryError::NotFound(EntityRef::Organization(
                organization.id(),
            )))?;
        *slot = organization.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: OrganizationId) -> RepositoryResult<Option<Organization>> {
        let organizations = self.organizations.read().map_err(lock_poisoned)?;
        Ok(organizations.get(&id).cloned())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Organization>> {
        let organizations = self.organizations.read().map_err(lock_poisoned)?;
        let mut all: Vec<Organization> = organizations.values().cloned().collect();
        all.sort_by_key(|organization| (organization.created_at(), organization.id()));
        Ok(all)
    }

    async fn delete(&self, id: OrganizationId) -> RepositoryResult<()> {
        let mut organizations = self.organizations.write().map_err(lock_poisoned)?;
        organizations
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(EntityRef::Organization(id)))
    }
}
