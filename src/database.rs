use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Build the Postgres pool without connecting.
///
/// Connections are opened on first use so the server starts even when the
/// database is down; `/health` reports the failure instead.
///
/// # Errors
/// Returns an error if the DSN cannot be parsed.
pub fn pool(dsn: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .min_connections(0)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .acquire_timeout(Duration::from_secs(3))
        .test_before_acquire(true)
        .connect_lazy(dsn)
        .context("Invalid database connection string")
}
