//! `PostgreSQL` organization repository.

use super::{
    VolunteeringPgPool, expect_affected, map_insert_error, models::OrganizationRow,
    run_blocking, schema::organizations,
};
use crate::volunteering::{
    domain::{Organization, OrganizationId},
    ports::{EntityRef, OrganizationRepository, RepositoryError, RepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed organization repository.
#[derive(Debug, Clone)]
pub struct PostgresOrganizationRepository {
    pool: VolunteeringPgPool,
}

impl PostgresOrganizationRepository {
    /// Creates a new repository from a connection pool.
    #[must_use]
    pub const fn new(pool: VolunteeringPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationRepository for PostgresOrganizationRepository {
    async fn store(&self, organization: &Organization) -> RepositoryResult<()> {
        let id = organization.id();
        let row = OrganizationRow::from_domain(organization);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(organizations::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| {
                    map_insert_error(err, RepositoryError::Duplicate(EntityRef::Organization(id)))
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, organization: &Organization) -> RepositoryResult<()> {
        let id = organization.id();
        let row = OrganizationRow::from_domain(organization);
        run_blocking(&self.pool, move |connection| {
            let rows = diesel::update(organizations::table.find(id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            expect_affected(rows, RepositoryError::NotFound(EntityRef::Organization(id)))
        })
        .await
    }

    async fn find_by_id(&self, id: OrganizationId) -> RepositoryResult<Option<Organization>> {
        run_blocking(&self.pool, move |connection| {
            organizations::table
                .find(id.into_inner())
                .select(OrganizationRow::as_select())
                .first::<OrganizationRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?
                .map(OrganizationRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Organization>> {
        run_blocking(&self.pool, move |connection| {
            organizations::table
                .order((organizations::created_at.asc(), organizations::id.asc()))
                .select(OrganizationRow::as_select())
                .load::<OrganizationRow>(connection)
                .map_err(RepositoryError::persistence)?
                .into_iter()
                .map(OrganizationRow::into_domain)
                .collect()
        })
        .await
    }

    async fn delete(&self, id: OrganizationId) -> RepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let rows = diesel::delete(organizations::table.find(id.into_inner()))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            expect_affected(rows, RepositoryError::NotFound(EntityRef::Organization(id)))
        })
        .await
    }
}
