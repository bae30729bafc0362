//! In-memory signup repository.
//!
//! The (task, volunteer) pair index is checked and written under the same
//! write lock as the record map, which makes the uniqueness check atomic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::lock_poisoned;
use crate::volunteering::{
    domain::{SignupId, TaskId, TaskSignup, VolunteerId},
    ports::{EntityRef, RepositoryError, RepositoryResult, SignupRepository},
};

/// Thread-safe in-memory signup repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySignupRepository {
    state: Arc<RwLock<InMemorySignupState>>,
}

#[derive(Debug, Default)]
struct InMemorySignupState {
    signups: HashMap<SignupId, TaskSignup>,
    pair_index: HashMap<(TaskId, VolunteerId), SignupId>,
}

impl InMemorySignupRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn select(
        &self,
        predicate: impl Fn(&TaskSignup) -> bool,
    ) -> RepositoryResult<Vec<TaskSignup>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut selected: Vec<TaskSignup> = state
            .signups
            .values()
            .filter(|&signup| predicate(signup))
            .cloned()
            .collect();
        selected.sort_by_key(|signup| (signup.signup_date(), signup.id()));
        Ok(selected)
    }
}

#[async_trait]
impl SignupRepository for InMemorySignupRepository {
    async fn store(&self, signup: &TaskSignup) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.signups.contains_key(&signup.id()) {
            return Err(RepositoryError::Duplicate(EntityRef::Signup(signup.id())));
        }

        let pair = (signup.task_id(), signup.volunteer_id());
        if state.pair_index.contains_key(&pair) {
            return Err(RepositoryError::DuplicateSignup {
                task_id: signup.task_id(),
                volunteer_id: signup.volunteer_id(),
            });
        }

        state.pair_index.insert(pair, signup.id());
        state.signups.insert(signup.id(), signup.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SignupId) -> RepositoryResult<Option<TaskSignup>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.signups.get(&id).cloned())
    }

    async fn find_by_task_and_volunteer(
        &self,
        task_id: TaskId,
        volunteer_id: VolunteerId,
    ) -> RepositoryResult<Option<TaskSignup>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let signup = state
            .pair_index
            .get(&(task_id, volunteer_id))
            .and_then(|signup_id| state.signups.get(signup_id))
            .cloned();
        Ok(signup)
    }

    async fn find_by_task(&self, task_id: TaskId) -> RepositoryResult<Vec<TaskSignup>> {
        self.select(|signup| signup.task_id() == task_id)
    }

    async fn find_by_volunteer(
        &self,
        volunteer_id: VolunteerId,
    ) -> RepositoryResult<Vec<TaskSignup>> {
        self.select(|signup| signup.volunteer_id() == volunteer_id)
    }

    async fn find_by_signup_date_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<TaskSignup>> {
        self.select(|signup| (start..=end).contains(&signup.signup_date()))
    }

    async fn list_all(&self) -> RepositoryResult<Vec<TaskSignup>> {
        self.select(|_| true)
    }

    async fn delete(&self, id: SignupId) -> RepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let removed = state
            .signups
            .remove(&id)
            .ok_or(RepositoryError::NotFound(EntityRef::Signup(id)))?;
        state
            .pair_index
            .remove(&(removed.task_id(), removed.volunteer_id()));
        Ok(())
    }
}
