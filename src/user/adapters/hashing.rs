//! Argon2id implementation of the [`PasswordHasher`] port.

use crate::config::HashingConfig;
use crate::user::{
    domain::{PasswordHash, PlainPassword},
    ports::{PasswordHashError, PasswordHasher},
};
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

const SALT_LENGTH: usize = 16;

/// Argon2id password hasher producing PHC strings.
///
/// Verification reads the cost parameters from the stored hash, so hashes
/// created under older settings keep verifying after the costs change.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with the Argon2 crate defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Creates a hasher with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hashing`] when the parameters are out of
    /// range (for example, memory below eight blocks per lane).
    pub fn from_config(config: &HashingConfig) -> Result<Self, PasswordHashError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|err| PasswordHashError::Hashing(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, PasswordHashError> {
        let mut salt_bytes = [0_u8; SALT_LENGTH];
        rand::rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| PasswordHashError::Hashing(err.to_string()))?;

        let hash = self
            .argon2()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHashError::Hashing(err.to_string()))?;
        Ok(PasswordHash::from_stored(hash.to_string()))
    }

    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = PhcHash::new(hash.as_str())
            .map_err(|err| PasswordHashError::MalformedHash(err.to_string()))?;

        match self.argon2().verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::Hashing(err.to_string())),
        }
    }
}
