//! Shared test helpers for `PostgreSQL` integration tests.

use mockable::DefaultClock;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use warbler::config::{DatabaseConfig, HashingConfig, TEST_DATABASE_URL_VAR};
use warbler::database::{self, PgPool};
use warbler::message::{adapters::postgres::PostgresMessageRepository, services::MessageService};
use warbler::user::{
    adapters::{hashing::Argon2PasswordHasher, postgres::PostgresUserRepository},
    domain::User,
    services::{AccountService, FollowService, SignupRequest},
};

static DATABASE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Services wired to a freshly reset `PostgreSQL` database.
///
/// Holds the suite-wide lock until dropped.
pub struct PgWarbler {
    /// Pool shared by the repositories.
    pub pool: PgPool,
    /// Signup and authentication.
    pub accounts: AccountService<PostgresUserRepository, Argon2PasswordHasher>,
    /// Follow graph.
    pub follows: FollowService<PostgresUserRepository>,
    /// Messages.
    pub messages: MessageService<PostgresMessageRepository, DefaultClock>,
    _lock: MutexGuard<'static, ()>,
}

/// Connects to the test database, applies the schema, and clears every
/// table.
///
/// The target comes from `WARBLER_TEST_DATABASE_URL` (never `DATABASE_URL`).
///
/// # Panics
///
/// Panics when the test database is misconfigured or unreachable, so a
/// missing server fails the suite instead of passing it vacuously.
pub async fn test_database() -> PgWarbler {
    let lock = DATABASE_LOCK.get_or_init(|| Mutex::new(())).lock().await;

    let config = DatabaseConfig::for_tests_from_env()
        .unwrap_or_else(|err| panic!("invalid {TEST_DATABASE_URL_VAR}: {err}"))
        .with_max_pool_size(2)
        .with_connect_timeout(Duration::from_secs(2));
    let url = config.url().to_owned();

    let pool = tokio::task::spawn_blocking(move || {
        let pool = database::connect(&config)?;
        database::create_all(&pool)?;
        database::reset_tables(&pool)?;
        Ok::<_, database::DatabaseError>(pool)
    })
    .await
    .expect("setup task should not panic")
    .unwrap_or_else(|err| {
        panic!(
            "PostgreSQL test database {url} is unavailable: {err}; \
             start a server or point {TEST_DATABASE_URL_VAR} at one"
        )
    });

    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    let hasher = Argon2PasswordHasher::from_config(&HashingConfig {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    })
    .expect("cheap params are valid");

    PgWarbler {
        accounts: AccountService::new(Arc::clone(&users), Arc::new(hasher)),
        follows: FollowService::new(users),
        messages: MessageService::new(
            Arc::new(PostgresMessageRepository::new(pool.clone())),
            Arc::new(DefaultClock),
        ),
        pool,
        _lock: lock,
    }
}

/// Signs up `username` with `<username>@test.com` and password `testpass`.
pub async fn sign_up(app: &PgWarbler, username: &str) -> User {
    app.accounts
        .signup(SignupRequest::new(
            username,
            format!("{username}@test.com"),
            "testpass",
        ))
        .await
        .expect("signup should succeed")
}
