//! `PostgreSQL` task repository.

use super::{
    VolunteeringPgPool, expect_affected, map_insert_error, models::TaskRow, run_blocking,
    schema::tasks,
};
use crate::volunteering::{
    domain::{OrganizationId, Task, TaskId},
    ports::{EntityRef, RepositoryError, RepositoryResult, TaskRepository},
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: VolunteeringPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a connection pool.
    #[must_use]
    pub const fn new(pool: VolunteeringPgPool) -> Self {
        Self { pool }
    }
}

fn rows_to_tasks(rows: Vec<TaskRow>) -> RepositoryResult<Vec<Task>> {
    rows.into_iter().map(TaskRow::into_domain).collect()
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> RepositoryResult<()> {
        let id = task.id();
        let row = TaskRow::from_domain(task);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| {
                    map_insert_error(err, RepositoryError::Duplicate(EntityRef::Task(id)))
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let id = task.id();
        let row = TaskRow::from_domain(task);
        run_blocking(&self.pool, move |connection| {
            let rows = diesel::update(tasks::table.find(id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            expect_affected(rows, RepositoryError::NotFound(EntityRef::Task(id)))
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?
                .map(TaskRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(RepositoryError::persistence)?;
            rows_to_tasks(rows)
        })
        .await
    }

    async fn find_by_organization(
        &self,
        organization_id: OrganizationId,
    ) -> RepositoryResult<Vec<Task>> {
        run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(tasks::organization_id.eq(organization_id.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(RepositoryError::persistence)?;
            rows_to_tasks(rows)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let rows = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            expect_affected(rows, RepositoryError::NotFound(EntityRef::Task(id)))
        })
        .await
    }
}
