//! Domain model for users and follow edges.
//!
//! Values are validated at construction; infrastructure concerns such as
//! hashing algorithms and storage stay outside this boundary.

mod connections;
mod email;
mod error;
mod follow;
mod ids;
mod password;
mod profile;
mod user;
mod username;

pub use connections::UserConnections;
pub use email::Email;
pub use error::UserDomainError;
pub use follow::Follow;
pub use ids::UserId;
pub use password::{MIN_PASSWORD_LENGTH, PasswordHash, PlainPassword};
pub use profile::{DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL, Profile};
pub use user::{NewUser, PersistedUserData, User};
pub use username::Username;
