//! Persistence layer: connection pool, migrations, row models and repositories.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// SQLSTATE raised by PostgreSQL for a unique constraint violation.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = sqlx::migrate!("../../db/migrations");
    migrator.run(pool).await?;
    tracing::debug!(count = migrator.iter().count(), "Migrations up to date");
    Ok(())
}

/// Whether `err` is a unique constraint violation, optionally on a specific constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: Option<&str>) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && constraint.map_or(true, |name| db_err.constraint() == Some(name))
        }
        _ => false,
    }
}
