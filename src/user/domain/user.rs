//! User aggregate root.

use super::{Email, PasswordHash, Profile, UserId, Username};
use std::fmt;

/// A validated user that has not been stored yet.
///
/// Storage assigns the identifier; see
/// [`UserRepository::insert`](crate::user::ports::UserRepository::insert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: Username,
    email: Email,
    password: PasswordHash,
    profile: Profile,
}

impl NewUser {
    /// Creates an unsaved user with the default profile.
    #[must_use]
    pub fn new(username: Username, email: Email, password: PasswordHash) -> Self {
        Self {
            username,
            email,
            password,
            profile: Profile::default(),
        }
    }

    /// Replaces the profile fields.
    #[must_use]
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the stored password hash.
    #[must_use]
    pub const fn password(&self) -> &PasswordHash {
        &self.password
    }

    /// Returns the profile fields.
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Attaches the identifier assigned by storage.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
            profile: self.profile,
        }
    }
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted identifier.
    pub id: UserId,
    /// Persisted username.
    pub username: Username,
    /// Persisted email address.
    pub email: Email,
    /// Persisted password hash.
    pub password: PasswordHash,
    /// Persisted profile fields.
    pub profile: Profile,
}

/// A stored user.
///
/// Formats as `<User #<id>: <username>, <email>>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    password: PasswordHash,
    profile: Profile,
}

impl User {
    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            email: data.email,
            password: data.password,
            profile: data.profile,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the stored password hash.
    #[must_use]
    pub const fn password(&self) -> &PasswordHash {
        &self.password
    }

    /// Returns the profile fields.
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Replaces the profile fields.
    pub fn update_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User #{}: {}, {}>", self.id, self.username, self.email)
    }
}
