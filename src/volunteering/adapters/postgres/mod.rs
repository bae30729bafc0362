//! `PostgreSQL` adapters for volunteering persistence.
//!
//! All Diesel calls are synchronous; they run on Tokio's blocking pool via
//! [`tokio::task::spawn_blocking`] so the async executor is never stalled.

mod models;
mod organization;
mod schema;
mod signup;
mod task;
mod volunteer;

pub use models::{OrganizationRow, SignupRow, TaskRow, VolunteerRow};
pub use organization::PostgresOrganizationRepository;
pub use signup::PostgresSignupRepository;
pub use task::PostgresTaskRepository;
pub use volunteer::PostgresVolunteerRepository;

use crate::volunteering::ports::{RepositoryError, RepositoryResult};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by volunteering adapters.
pub type VolunteeringPgPool = Pool<ConnectionManager<PgConnection>>;

/// SQL creating the volunteering tables, indexes and constraints.
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_volunteering_tables/up.sql");

/// Applies [`SCHEMA_SQL`] on an open connection.
///
/// # Errors
///
/// Returns the Diesel error when any statement fails.
pub fn apply_schema(connection: &mut PgConnection) -> Result<(), DieselError> {
    connection.batch_execute(SCHEMA_SQL)
}

/// Runs `f` with a pooled connection on the blocking thread pool.
async fn run_blocking<F, T>(pool: &VolunteeringPgPool, f: F) -> RepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(RepositoryError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(RepositoryError::persistence)?
}

/// Maps an insert failure, turning a primary-key violation into `duplicate`.
fn map_insert_error(err: DieselError, duplicate: RepositoryError) -> RepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => duplicate,
        other => RepositoryError::persistence(other),
    }
}

/// Converts an affected-row count into `NotFound` when nothing matched.
fn expect_affected(rows: usize, not_found: RepositoryError) -> RepositoryResult<()> {
    if rows == 0 {
        return Err(not_found);
    }
    Ok(())
}
