//! Service layer for signup, authentication, and profile management.

use crate::user::{
    domain::{
        Email, NewUser, PasswordHash, PlainPassword, Profile, User, UserDomainError, UserId,
        Username,
    },
    ports::{PasswordHashError, PasswordHasher, UserRepository, UserRepositoryError},
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

/// Password hashed once per service and verified against when the
/// username does not resolve to a stored user.
const DUMMY_PASSWORD: &str = "warbler-unknown-user";

/// Signup form payload.
///
/// Every field is optional at this stage so that missing input is reported
/// as a validation error instead of being impossible to express.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    image_url: Option<String>,
}

impl SignupRequest {
    /// Creates a request with the three required fields.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            email: Some(email.into()),
            password: Some(password.into()),
            image_url: None,
        }
    }

    /// Sets the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Replacement profile fields; `None` or blank restores the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdate {
    /// Avatar URL.
    pub image_url: Option<String>,
    /// Header image URL.
    pub header_image_url: Option<String>,
    /// Biography.
    pub bio: Option<String>,
    /// Location.
    pub location: Option<String>,
}

impl ProfileUpdate {
    fn into_profile(self) -> Profile {
        Profile::default()
            .with_image_url(self.image_url.as_deref())
            .with_header_image_url(self.header_image_url.as_deref())
            .with_bio(self.bio.as_deref())
            .with_location(self.location.as_deref())
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Password hashing or verification failed.
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
}

/// Result type for account service operations.
pub type AccountServiceResult<T> = Result<T, AccountServiceError>;

/// Signup, authentication, and profile orchestration service.
///
/// Hashing and verification run on the blocking thread pool.
#[derive(Clone)]
pub struct AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    dummy_hash: OnceCell<PasswordHash>,
}

impl<R, H> AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    /// Creates a new account service.
    #[must_use]
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            repository,
            hasher,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Validates the request, hashes the password, and stores a new user.
    ///
    /// A blank or absent `image_url` falls back to the default avatar.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Domain`] when a required field is
    /// missing or invalid, [`AccountServiceError::Hashing`] when hashing
    /// fails, or [`AccountServiceError::Repository`] when the username or
    /// email is taken or persistence fails.
    pub async fn signup(&self, request: SignupRequest) -> AccountServiceResult<User> {
        let SignupRequest {
            username,
            email,
            password,
            image_url,
        } = request;

        let username = Username::new(username.ok_or(UserDomainError::MissingField("username"))?)?;
        let email = Email::new(email.ok_or(UserDomainError::MissingField("email"))?)?;
        let password =
            PlainPassword::new(password.ok_or(UserDomainError::MissingField("password"))?)?;

        let hash = self.hash_password(password).await?;
        let new_user = NewUser::new(username, email, hash)
            .with_profile(Profile::default().with_image_url(image_url.as_deref()));

        let user = self.repository.insert(&new_user).await?;
        tracing::info!(user_id = %user.id(), username = %user.username(), "user signed up");
        Ok(user)
    }

    /// Returns the user when `username` and `password` match.
    ///
    /// Unknown usernames and wrong passwords both yield `Ok(None)`, and
    /// both pay for one password verification.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when lookup fails or
    /// [`AccountServiceError::Hashing`] when the stored hash is malformed.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> AccountServiceResult<Option<User>> {
        let Ok(username) = Username::new(username) else {
            tracing::debug!("authentication rejected: malformed username");
            self.verify_against_dummy(password).await;
            return Ok(None);
        };

        let Some(user) = self.repository.find_by_username(&username).await? else {
            tracing::warn!(username = %username, "authentication failed: unknown user");
            self.verify_against_dummy(password).await;
            return Ok(None);
        };

        if self.verify_password(password, user.password()).await? {
            tracing::debug!(user_id = %user.id(), "authentication succeeded");
            Ok(Some(user))
        } else {
            tracing::warn!(user_id = %user.id(), "authentication failed: wrong password");
            Ok(None)
        }
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: UserId) -> AccountServiceResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Domain`] when the username is invalid
    /// or [`AccountServiceError::Repository`] when lookup fails.
    pub async fn find_by_username(&self, username: &str) -> AccountServiceResult<Option<User>> {
        let username = Username::new(username)?;
        Ok(self.repository.find_by_username(&username).await?)
    }

    /// Returns every user ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when lookup fails.
    pub async fn list_all(&self) -> AccountServiceResult<Vec<User>> {
        Ok(self.repository.list_all().await?)
    }

    /// Replaces a user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when the user is not found
    /// or persistence fails.
    pub async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> AccountServiceResult<User> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserRepositoryError::NotFound(id))?;
        user.update_profile(update.into_profile());
        self.repository.update(&user).await?;
        tracing::info!(user_id = %id, "profile updated");
        Ok(user)
    }

    /// Deletes a user along with their messages and follow edges.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when the user is not found
    /// or persistence fails.
    pub async fn delete(&self, id: UserId) -> AccountServiceResult<()> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    async fn hash_password(
        &self,
        password: PlainPassword,
    ) -> Result<PasswordHash, PasswordHashError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| PasswordHashError::Hashing(err.to_string()))?
    }

    async fn verify_password(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let hasher = Arc::clone(&self.hasher);
        let candidate = candidate.to_owned();
        let hash = hash.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&candidate, &hash))
            .await
            .map_err(|err| PasswordHashError::Hashing(err.to_string()))?
    }

    /// Spends the cost of a real verification; the outcome is discarded.
    async fn verify_against_dummy(&self, candidate: &str) {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| async {
                let password = PlainPassword::new(DUMMY_PASSWORD)
                    .map_err(|err| PasswordHashError::Hashing(err.to_string()))?;
                self.hash_password(password).await
            })
            .await;

        let outcome = match dummy {
            Ok(hash) => self.verify_password(candidate, hash).await.map(drop),
            Err(err) => Err(err),
        };
        if let Err(err) = outcome {
            tracing::debug!(error = %err, "dummy password verification failed");
        }
    }
}
