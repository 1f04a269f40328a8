/// Database migration runner
///
/// Runs the SQL migrations embedded from the `migrations/` directory of this
/// crate. The API binary calls `run_migrations` at startup so a fresh
/// database is brought up to the current schema before serving traffic.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration file fails to apply or the connection is
/// lost mid-migration. sqlx runs each migration in its own transaction where
/// the statements allow it.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("Database migrations complete");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

/// Returns the number of applied migrations
///
/// Queries the `_sqlx_migrations` bookkeeping table; returns 0 when the
/// table does not exist yet (fresh database).
pub async fn applied_migration_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let exists: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_name = '_sqlx_migrations'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !exists.0 {
        return Ok(0);
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
