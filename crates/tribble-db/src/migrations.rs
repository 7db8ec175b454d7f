//! Database migration management.
//!
//! Migrations live in `migrations/` at the crate root and are embedded into
//! the binary at compile time.

use sqlx::migrate::MigrateError;
use sqlx::PgPool;

/// Run all pending migrations.
///
/// Safe to call on every startup: applied migrations are skipped.
///
/// # Errors
///
/// Returns the driver's `MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}
