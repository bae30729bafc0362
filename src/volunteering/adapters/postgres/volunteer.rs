//! `PostgreSQL` volunteer repository.

use super::{
    VolunteeringPgPool, expect_affected, map_insert_error, models::VolunteerRow, run_blocking,
    schema::volunteers,
};
use crate::volunteering::{
    domain::{Volunteer, VolunteerId},
    ports::{EntityRef, RepositoryError, RepositoryResult, VolunteerRepository},
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed volunteer repository.
#[derive(Debug, Clone)]
pub struct PostgresVolunteerRepository {
    pool: VolunteeringPgPool,
}

impl PostgresVolunteerRepository {
    /// Creates a new repository from a connection pool.
    #[must_use]
    pub const fn new(pool: VolunteeringPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VolunteerRepository for PostgresVolunteerRepository {
    async fn store(&self, volunteer: &Volunteer) -> RepositoryResult<()> {
        let id = volunteer.id();
        let row = VolunteerRow::from_domain(volunteer);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(volunteers::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| {
                    map_insert_error(err, RepositoryError::Duplicate(EntityRef::Volunteer(id)))
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, volunteer: &Volunteer) -> RepositoryResult<()> {
        let id = volunteer.id();
        let row = VolunteerRow::from_domain(volunteer);
        run_blocking(&self.pool, move |connection| {
            let rows = diesel::update(volunteers::table.find(id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            expect_affected(rows, RepositoryError::NotFound(EntityRef::Volunteer(id)))
        })
        .await
    }

    async fn find_by_id(&self, id: VolunteerId) -> RepositoryResult<Option<Volunteer>> {
        run_blocking(&self.pool, move |connection| {
            volunteers::table
                .find(id.into_inner())
                .select(VolunteerRow::as_select())
                .first::<VolunteerRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?
                .map(VolunteerRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Volunteer>> {
        run_blocking(&self.pool, move |connection| {
            volunteers::table
                .order((volunteers::created_at.asc(), volunteers::id.asc()))
                .select(VolunteerRow::as_select())
                .load::<VolunteerRow>(connection)
                .map_err(RepositoryError::persistence)?
                .into_iter()
                .map(VolunteerRow::into_domain)
                .collect()
        })
        .await
    }

    async fn delete(&self, id: VolunteerId) -> RepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let rows = diesel::delete(volunteers::table.find(id.into_inner()))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            expect_affected(rows, RepositoryError::NotFound(EntityRef::Volunteer(id)))
        })
        .await
    }
}
