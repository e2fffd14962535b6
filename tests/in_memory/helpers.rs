//! Shared test helpers for in-memory integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use warbler::config::HashingConfig;
use warbler::database::memory::InMemoryStore;
use warbler::message::services::MessageService;
use warbler::user::{
    adapters::hashing::Argon2PasswordHasher,
    domain::User,
    services::{AccountService, FollowService, SignupRequest},
};

/// Services wired to one shared in-memory store.
pub struct Warbler {
    /// Backing store shared by every service.
    pub store: Arc<InMemoryStore>,
    /// Signup and authentication.
    pub accounts: AccountService<InMemoryStore, Argon2PasswordHasher>,
    /// Follow graph.
    pub follows: FollowService<InMemoryStore>,
    /// Messages.
    pub messages: MessageService<InMemoryStore, DefaultClock>,
}

/// Argon2 costs low enough to keep the suite fast.
#[must_use]
pub fn cheap_hasher() -> Argon2PasswordHasher {
    let config = HashingConfig {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    };
    Argon2PasswordHasher::from_config(&config).expect("cheap params are valid")
}

/// Provides services over a fresh store whose identifiers start at 1.
#[fixture]
pub fn app() -> Warbler {
    let store = Arc::new(InMemoryStore::new());
    Warbler {
        accounts: AccountService::new(Arc::clone(&store), Arc::new(cheap_hasher())),
        follows: FollowService::new(Arc::clone(&store)),
        messages: MessageService::new(Arc::clone(&store), Arc::new(DefaultClock)),
        store,
    }
}

/// Signs up `username` with `<username>@test.com` and password `testpass`.
pub async fn sign_up(app: &Warbler, username: &str) -> User {
    app.accounts
        .signup(SignupRequest::new(
            username,
            format!("{username}@test.com"),
            "testpass",
        ))
        .await
        .expect("signup should succeed")
}
