//! Applies the volunteering schema to the configured `PostgreSQL` database.
//!
//! Usage:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/volunteers volunteer-migrate
//! ```
//!
//! Variables may also come from a `.env` file in the working directory.

use diesel::Connection;
use diesel::pg::PgConnection;
use volunteer_platform::config::StoreConfig;
use volunteer_platform::telemetry::init_tracing;
use volunteer_platform::volunteering::adapters::postgres::apply_schema;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    let config = StoreConfig::from_env()?;
    init_tracing(config.log_format);

    let mut connection = PgConnection::establish(&config.database_url)?;
    tracing::info!("Database connection established");

    apply_schema(&mut connection)?;
    tracing::info!("Volunteering schema applied");
    Ok(())
}
