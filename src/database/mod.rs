//! Shared database plumbing: connection pooling and schema management.
//!
//! The schema is embedded from `migrations/` and applied with
//! [`create_all`]. [`reset_tables`] empties every table and restarts the
//! identity sequences, which is how test suites isolate each case before it
//! runs.

pub mod memory;

use crate::config::DatabaseConfig;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by the repository adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// SQL creating the users, follows, and messages tables.
pub const CREATE_TABLES_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_warbler_tables/up.sql");

/// SQL dropping every table created by [`CREATE_TABLES_SQL`].
pub const DROP_TABLES_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_warbler_tables/down.sql");

const RESET_TABLES_SQL: &str = "TRUNCATE TABLE messages, follows, users RESTART IDENTITY CASCADE;";

/// Errors raised by pool construction and schema management.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The pool could not be built or a connection could not be checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// A schema statement failed.
    #[error("schema statement failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Builds a connection pool from the given settings.
///
/// Building the pool opens its initial connections, so an unreachable
/// server fails here rather than on first use.
///
/// # Errors
///
/// Returns [`DatabaseError::Pool`] when no connection can be established
/// within the configured timeout.
pub fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let manager = ConnectionManager::<PgConnection>::new(config.url());
    let pool = Pool::builder()
        .max_size(config.max_pool_size())
        .connection_timeout(config.connect_timeout())
        .build(manager)?;
    tracing::debug!(max_size = config.max_pool_size(), "database pool ready");
    Ok(pool)
}

/// Creates every table that does not exist yet.
///
/// # Errors
///
/// Returns [`DatabaseError`] when a connection cannot be obtained or a
/// statement fails.
pub fn create_all(pool: &PgPool) -> Result<(), DatabaseError> {
    execute_script(pool, CREATE_TABLES_SQL)?;
    tracing::info!("schema created");
    Ok(())
}

/// Drops every table.
///
/// # Errors
///
/// Returns [`DatabaseError`] when a connection cannot be obtained or a
/// statement fails.
pub fn drop_all(pool: &PgPool) -> Result<(), DatabaseError> {
    execute_script(pool, DROP_TABLES_SQL)?;
    tracing::info!("schema dropped");
    Ok(())
}

/// Deletes all rows from messages, follows, and users.
///
/// Identity sequences restart, so the next user inserted receives id 1.
///
/// # Errors
///
/// Returns [`DatabaseError`] when a connection cannot be obtained or a
/// statement fails.
pub fn reset_tables(pool: &PgPool) -> Result<(), DatabaseError> {
    execute_script(pool, RESET_TABLES_SQL)?;
    tracing::debug!("tables reset");
    Ok(())
}

fn execute_script(pool: &PgPool, sql: &str) -> Result<(), DatabaseError> {
    let mut connection = pool.get()?;
    connection.batch_execute(sql)?;
    Ok(())
}

/// Boxed infrastructure error passed to adapter error mappers.
pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Runs a blocking Diesel operation on the blocking thread pool.
///
/// Pool checkout and join failures are mapped into the caller's error type
/// through `map_err`.
pub(crate) async fn run_blocking<F, T, E>(
    pool: &PgPool,
    map_err: fn(BoxError) -> E,
    f: F,
) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(|err| map_err(Box::new(err)))?;
        f(&mut connection)
    })
    .await
    .map_err(|err| map_err(Box::new(err)))?
}
