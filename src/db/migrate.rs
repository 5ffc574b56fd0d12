//! Migration runner on top of `sqlx::migrate`.
//!
//! Applied migrations are tracked by sqlx in `_sqlx_migrations`. The whole run
//! happens inside one `BEGIN IMMEDIATE` transaction, so concurrent processes
//! opening the same fresh file apply each migration exactly once.

use crate::db::schema::MIGRATOR;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use sqlx::migrate::Migrator;
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AppliedMigration {
    pub version: i64,
    pub description: String,
    pub installed_on: DateTime<Utc>,
}

/// Apply every pending migration. Returns how many were applied.
pub async fn run_migrations(pool: &SqlitePool) -> Result<usize, AppError> {
    run_with(pool, &MIGRATOR).await
}

/// Applied migrations, oldest first.
pub async fn applied_migrations(pool: &SqlitePool) -> Result<Vec<AppliedMigration>, AppError> {
    let rows = sqlx::query_as::<_, AppliedMigration>(
        "SELECT version, description, installed_on FROM _sqlx_migrations
         WHERE success = 1 ORDER BY version",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

async fn run_with(pool: &SqlitePool, migrator: &Migrator) -> Result<usize, AppError> {
    // Take the write lock before reading migration state.
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let before = applied_versions(&mut *tx).await?;
    for migration in migrator.iter() {
        if before.contains(&migration.version) {
            debug!(
                version = migration.version,
                description = %migration.description,
                "migration already applied, skipping"
            );
        } else {
            info!(
                version = migration.version,
                description = %migration.description,
                "applying migration"
            );
        }
    }

    // Nested in `tx`: each migration runs under its own savepoint.
    migrator.run(&mut *tx).await?;

    let after = applied_versions(&mut *tx).await?;
    tx.commit().await?;

    Ok(after.len().saturating_sub(before.len()))
}

async fn applied_versions(conn: &mut SqliteConnection) -> Result<Vec<i64>, sqlx::Error> {
    let (tracked,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(&mut *conn)
    .await?;
    if tracked == 0 {
        return Ok(Vec::new());
    }

    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT version FROM _sqlx_migrations WHERE success = 1 ORDER BY version")
            .fetch_all(&mut *conn)
            .await?;
    Ok(rows.into_iter().map(|(v,)| v).collect())
}
