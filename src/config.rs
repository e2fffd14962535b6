//! Runtime configuration read from environment variables.
//!
//! Configuration is resolved once into a [`WarblerConfig`] value and passed
//! explicitly to [`crate::database::connect`] and the password hasher, so
//! the connection target is fixed before any pool exists.

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the `PostgreSQL` connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable overriding the connection pool size.
pub const POOL_SIZE_VAR: &str = "WARBLER_DB_POOL_SIZE";

/// Environment variable overriding the pool connection timeout in seconds.
pub const CONNECT_TIMEOUT_VAR: &str = "WARBLER_DB_CONNECT_TIMEOUT_SECS";

/// Environment variable overriding the Argon2 memory cost in KiB.
pub const ARGON2_MEMORY_VAR: &str = "WARBLER_ARGON2_MEMORY_KIB";

/// Environment variable overriding the Argon2 iteration count.
pub const ARGON2_ITERATIONS_VAR: &str = "WARBLER_ARGON2_ITERATIONS";

/// Environment variable overriding the Argon2 lane count.
pub const ARGON2_PARALLELISM_VAR: &str = "WARBLER_ARGON2_PARALLELISM";

/// Connection string used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "postgresql:///warbler";

/// Connection string of the dedicated test database.
pub const TEST_DATABASE_URL: &str = "postgresql:///warbler-test";

/// Environment variable overriding [`TEST_DATABASE_URL`].
///
/// Test suites read only this variable, never [`DATABASE_URL_VAR`], so an
/// exported production URL cannot be truncated by a test run.
pub const TEST_DATABASE_URL_VAR: &str = "WARBLER_TEST_DATABASE_URL";

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

// Argon2id defaults recommended by OWASP (m=19 MiB, t=2, p=1).
const DEFAULT_ARGON2_MEMORY_KIB: u32 = 19_456;
const DEFAULT_ARGON2_ITERATIONS: u32 = 2;
const DEFAULT_ARGON2_PARALLELISM: u32 = 1;

/// Errors raised while resolving configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue {
        /// Name of the offending variable.
        key: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// A variable was set to an empty string.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// The test database resolved to the same URL as `DATABASE_URL`.
    #[error("test database URL '{0}' is also the application DATABASE_URL")]
    SharedTestDatabase(String),
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    url: String,
    max_pool_size: u32,
    connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates settings for the given URL with default pool parameters.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_pool_size: DEFAULT_POOL_SIZE,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Settings pointing at [`TEST_DATABASE_URL`].
    #[must_use]
    pub fn for_tests() -> Self {
        Self::new(TEST_DATABASE_URL)
    }

    /// Test settings resolved from the process environment.
    ///
    /// # Errors
    ///
    /// See [`DatabaseConfig::for_tests_from_lookup`].
    pub fn for_tests_from_env() -> Result<Self, ConfigError> {
        Self::for_tests_from_lookup(|key| std::env::var(key).ok())
    }

    /// Test settings resolved through an arbitrary key lookup.
    ///
    /// The URL comes from [`TEST_DATABASE_URL_VAR`] and defaults to
    /// [`TEST_DATABASE_URL`]; `DATABASE_URL` is only consulted to refuse a
    /// test target that is also the application database.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] when the override is blank, or
    /// [`ConfigError::SharedTestDatabase`] when it equals `DATABASE_URL`.
    pub fn for_tests_from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let url = match lookup(TEST_DATABASE_URL_VAR) {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::Empty(TEST_DATABASE_URL_VAR));
            }
            Some(value) => value.trim().to_owned(),
            None => TEST_DATABASE_URL.to_owned(),
        };

        if lookup(DATABASE_URL_VAR).is_some_and(|app_url| app_url.trim() == url) {
            return Err(ConfigError::SharedTestDatabase(url));
        }
        Ok(Self::new(url))
    }

    /// Sets the maximum number of pooled connections.
    #[must_use]
    pub const fn with_max_pool_size(mut self, size: u32) -> Self {
        self.max_pool_size = size;
        self
    }

    /// Sets how long the pool waits for a connection.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Returns the connection string.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn max_pool_size(&self) -> u32 {
        self.max_pool_size
    }

    /// Returns the pool connection timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_ARGON2_MEMORY_KIB,
            iterations: DEFAULT_ARGON2_ITERATIONS,
            parallelism: DEFAULT_ARGON2_PARALLELISM,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarblerConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Password hashing cost parameters.
    pub hashing: HashingConfig,
}

impl WarblerConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = match lookup(DATABASE_URL_VAR) {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::Empty(DATABASE_URL_VAR));
            }
            Some(value) => value.trim().to_owned(),
            None => DEFAULT_DATABASE_URL.to_owned(),
        };

        let max_pool_size = parse_or(&lookup, POOL_SIZE_VAR, DEFAULT_POOL_SIZE)?;
        if max_pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: POOL_SIZE_VAR,
                value: "0".to_owned(),
            });
        }
        let timeout_secs = parse_or(&lookup, CONNECT_TIMEOUT_VAR, DEFAULT_CONNECT_TIMEOUT_SECS)?;

        let database = DatabaseConfig::new(url)
            .with_max_pool_size(max_pool_size)
            .with_connect_timeout(Duration::from_secs(timeout_secs));

        let hashing = HashingConfig {
            memory_kib: parse_or(&lookup, ARGON2_MEMORY_VAR, DEFAULT_ARGON2_MEMORY_KIB)?,
            iterations: parse_or(&lookup, ARGON2_ITERATIONS_VAR, DEFAULT_ARGON2_ITERATIONS)?,
            parallelism: parse_or(&lookup, ARGON2_PARALLELISM_VAR, DEFAULT_ARGON2_PARALLELISM)?,
        };

        Ok(Self { database, hashing })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw })
    })
}
