//! In-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::lock_poisoned;
use crate::volunteering::{
    domain::{OrganizationId, Task, TaskId},
    ports::{EntityRef, RepositoryError, RepositoryResult, TaskRepository},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Collects matching tasks, oldest first.
fn collect_sorted<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut collected: Vec<Task> = tasks.cloned().collect();
    collected.sort_by_key(|task| (task.created_at(), task.id()));
    collected
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> RepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_poisoned)?;
        if tasks.contains_key(&task.id()) {
            return Err(RepositoryError::Duplicate(EntityRef::Task(task.id())));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_poisoned)?;
        let slot = tasks
            .get_mut(&task.id())
            .ok_or(RepositoryError::NotFound(EntityRef::Task(task.id())))?;
        *slot = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        let tasks = self.tasks.read().map_err(lock_poisoned)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(lock_poisoned)?;
        Ok(collect_sorted(tasks.values()))
    }

    async fn find_by_organization(
        &self,
        organization_id: OrganizationId,
    ) -> RepositoryResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(lock_poisoned)?;
        Ok(collect_sorted(
            tasks
                .values()
                .filter(|task| task.organization_id() == organization_id),
        ))
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_poisoned)?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(EntityRef::Task(id)))
    }
}
