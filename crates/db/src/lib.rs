//! Postgres persistence for the room planner.
//!
//! - [`models`] -- row structs and create/update DTOs.
//! - [`repositories`] -- the catalog, room and placement stores.

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Default pool size when `DB_MAX_CONNECTIONS` is not set.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Deadline applied to every store operation, transactions included.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(QUERY_TIMEOUT)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    with_deadline(async {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok::<_, sqlx::Error>(())
    })
    .await
}

/// Apply the migrations under `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Run `operation` under [`QUERY_TIMEOUT`].
///
/// Expiry surfaces as an `sqlx::Error::Io` of kind `TimedOut` so callers see
/// a storage failure rather than an absent row. An open transaction inside
/// `operation` is dropped on expiry, which rolls it back.
pub async fn with_deadline<T, F>(operation: F) -> Result<T, sqlx::Error>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(QUERY_TIMEOUT, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                timeout_ms = QUERY_TIMEOUT.as_millis() as u64,
                "Store operation exceeded its deadline"
            );
            Err(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "store operation exceeded its deadline",
            )))
        }
    }
}

/// `true` when `err` came from [`with_deadline`] or from pool acquisition
/// timing out.
pub fn is_timeout(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Io(io) => io.kind() == std::io::ErrorKind::TimedOut,
        _ => false,
    }
}
