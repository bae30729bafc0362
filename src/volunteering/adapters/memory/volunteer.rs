//! In-memory volunteer repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::lock_poisoned;
use crate::volunteering::{
    domain::{Volunteer, VolunteerId},
    ports::{EntityRef, RepositoryError, RepositoryResult, VolunteerRepository},
};

/// Thread-safe in-memory volunteer repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVolunteerRepository {
    volunteers: Arc<RwLock<HashMap<VolunteerId, Volunteer>>>,
}

impl InMemoryVolunteerRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VolunteerRepository for InMemoryVolunteerRepository {
    async fn store(&self, volunteer: &Volunteer) -> RepositoryResult<()> {
        let mut volunteers = self.volunteers.write().map_err(lock_poisoned)?;
        if volunteers.contains_key(&volunteer.id()) {
            return Err(RepositoryError::Duplicate(EntityRef::Volunteer(volunteer.id())));
        }
        volunteers.insert(volunteer.id(), volunteer.clone());
        Ok(())
    }

    async fn update(&self, volunteer: &Volunteer) -> RepositoryResult<()> {
        let mut volunteers = self.volunteers.write().map_err(lock_poisoned)?;
        let slot = volunteers
            .get_mut(&volunteer.id())
            .ok_or(RepositoryError::NotFound(EntityRef::Volunteer(volunteer.id())))?;
        *slot = volunteer.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: VolunteerId) -> RepositoryResult<Option<Volunteer>> {
        let volunteers = self.volunteers.read().map_err(lock_poisoned)?;
        Ok(volunteers.get(&id).cloned())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Volunteer>> {
        let volunteers = self.volunteers.read().map_err(lock_poisoned)?;
        let mut all: Vec<Volunteer> = volunteers.values().cloned().collect();
        all.sort_by_key(|volunteer| (volunteer.created_at(), volunteer.id()));
        Ok(all)
    }

    async fn delete(&self, id: VolunteerId) -> RepositoryResult<()> {
        let mut volunteers = self.volunteers.write().map_err(lock_poisoned)?;
        volunteers
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(EntityRef::Volunteer(id)))
    }
}
