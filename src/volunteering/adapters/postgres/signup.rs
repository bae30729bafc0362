//! `PostgreSQL` signup repository.
//!
//! Uniqueness of (task, volunteer) rests on the
//! `idx_task_signups_task_volunteer_unique` index, not on a prior lookup.

use super::{
    VolunteeringPgPool, expect_affected, models::SignupRow, run_blocking, schema::task_signups,
};
use crate::volunteering::{
    domain::{SignupId, TaskId, TaskSignup, VolunteerId},
    ports::{EntityRef, RepositoryError, RepositoryResult, SignupRepository},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

const PAIR_UNIQUE_INDEX: &str = "idx_task_signups_task_volunteer_unique";

/// `PostgreSQL`-backed signup repository.
#[derive(Debug, Clone)]
pub struct PostgresSignupRepository {
    pool: VolunteeringPgPool,
}

impl PostgresSignupRepository {
    /// Creates a new repository from a connection pool.
    #[must_use]
    pub const fn new(pool: VolunteeringPgPool) -> Self {
        Self { pool }
    }

    async fn load_where<F>(&self, query: F) -> RepositoryResult<Vec<TaskSignup>>
    where
        F: FnOnce(&mut PgConnection) -> Result<Vec<SignupRow>, DieselError> + Send + 'static,
    {
        run_blocking(&self.pool, move |connection| {
            let rows = query(connection).map_err(RepositoryError::persistence)?;
            Ok(rows.into_iter().map(SignupRow::into_domain).collect())
        })
        .await
    }
}

fn is_pair_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == PAIR_UNIQUE_INDEX)
}

#[async_trait]
impl SignupRepository for PostgresSignupRepository {
    async fn store(&self, signup: &TaskSignup) -> RepositoryResult<()> {
        let id = signup.id();
        let task_id = signup.task_id();
        let volunteer_id = signup.volunteer_id();
        let row = SignupRow::from_domain(signup);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(task_signups::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_pair_unique_violation(info.as_ref()) =>
                    {
                        RepositoryError::DuplicateSignup {
                            task_id,
                            volunteer_id,
                        }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::Duplicate(EntityRef::Signup(id))
                    }
                    _ => RepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: SignupId) -> RepositoryResult<Option<TaskSignup>> {
        run_blocking(&self.pool, move |connection| {
            let row = task_signups::table
                .find(id.into_inner())
                .select(SignupRow::as_select())
                .first::<SignupRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            Ok(row.map(SignupRow::into_domain))
        })
        .await
    }

    async fn find_by_task_and_volunteer(
        &self,
        task_id: TaskId,
        volunteer_id: VolunteerId,
    ) -> RepositoryResult<Option<TaskSignup>> {
        run_blocking(&self.pool, move |connection| {
            let row = task_signups::table
                .filter(task_signups::task_id.eq(task_id.into_inner()))
                .filter(task_signups::volunteer_id.eq(volunteer_id.into_inner()))
                .select(SignupRow::as_select())
                .first::<SignupRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            Ok(row.map(SignupRow::into_domain))
        })
        .await
    }

    async fn find_by_task(&self, task_id: TaskId) -> RepositoryResult<Vec<TaskSignup>> {
        self.load_where(move |connection| {
            task_signups::table
                .filter(task_signups::task_id.eq(task_id.into_inner()))
                .order((task_signups::signup_date.asc(), task_signups::id.asc()))
                .select(SignupRow::as_select())
                .load::<SignupRow>(connection)
        })
        .await
    }

    async fn find_by_volunteer(
        &self,
        volunteer_id: VolunteerId,
    ) -> RepositoryResult<Vec<TaskSignup>> {
        self.load_where(move |connection| {
            task_signups::table
                .filter(task_signups::volunteer_id.eq(volunteer_id.into_inner()))
                .order((task_signups::signup_date.asc(), task_signups::id.asc()))
                .select(SignupRow::as_select())
                .load::<SignupRow>(connection)
        })
        .await
    }

    async fn find_by_signup_date_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<TaskSignup>> {
        self.load_where(move |connection| {
            task_signups::table
                .filter(task_signups::signup_date.between(start, end))
                .order((task_signups::signup_date.asc(), task_signups::id.asc()))
                .select(SignupRow::as_select())
                .load::<SignupRow>(connection)
        })
        .await
    }

    async fn list_all(&self) -> RepositoryResult<Vec<TaskSignup>> {
        self.load_where(|connection| {
            task_signups::table
                .order((task_signups::signup_date.asc(), task_signups::id.asc()))
                .select(SignupRow::as_select())
                .load::<SignupRow>(connection)
        })
        .await
    }

    async fn delete(&self, id: SignupId) -> RepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let rows = diesel::delete(task_signups::table.find(id.into_inner()))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            expect_affected(rows, RepositoryError::NotFound(EntityRef::Signup(id)))
        })
        .await
    }
}
