//! Port contracts for user persistence and credential hashing.
//!
//! Ports define infrastructure-agnostic interfaces used by the account and
//! follow services.

pub mod follow;
pub mod hasher;
pub mod repository;

pub use follow::{FollowRepository, FollowRepositoryError, FollowRepositoryResult};
pub use hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use hasher::MockPasswordHasher;
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
