//! Construction options and connection resolution.

use deadpool_redis::{Config, Pool, Runtime};
use rstore_config::StorageConfig;
use rstore_core::{StorageError, StorageResult};
use std::fmt;
use tracing::debug;
use url::Url;

/// Where a storage's connection pool came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionSource {
    /// Built by the storage from these resolved settings.
    Owned(StorageConfig),
    /// Supplied by the caller. Address, database and password were ignored.
    External,
}

/// Options for building a [`crate::RedisStorage`].
///
/// Each `with_*` call sets one field; a later call for the same field
/// replaces the earlier value. Supplying a pool with [`Self::with_pool`]
/// takes precedence over every other setting, whatever the call order.
#[derive(Clone, Default)]
pub struct RedisStorageOptions {
    config: StorageConfig,
    pool: Option<Pool>,
}

impl RedisStorageOptions {
    /// Creates options with default settings (`localhost:6379`, database 0,
    /// no password).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options from loaded configuration.
    #[must_use]
    pub fn from_config(config: StorageConfig) -> Self {
        Self { config, pool: None }
    }

    /// Sets the Redis address as `host:port`. Empty means `localhost:6379`.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.config.address = address.into();
        self
    }

    /// Sets the logical database index.
    #[must_use]
    pub fn with_database(mut self, database: i64) -> Self {
        self.config.database = database;
        self
    }

    /// Sets the password. Empty means no password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(password.into());
        self
    }

    /// Uses a caller-owned pool; all other settings are discarded.
    ///
    /// The pool is shared, not copied. Closing the storage closes the pool
    /// for every holder of a clone.
    #[must_use]
    pub fn with_pool(mut self, pool: Pool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Returns the settings gathered so far.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Returns true if a caller-owned pool was supplied.
    #[must_use]
    pub fn has_pool(&self) -> bool {
        self.pool.is_some()
    }

    /// Turns the options into a pool and a record of where it came from.
    ///
    /// Pool creation is lazy: no connection is opened until first use.
    pub(crate) fn resolve(self) -> StorageResult<(Pool, ConnectionSource)> {
        if let Some(pool) = self.pool {
            debug!("Using caller-supplied Redis pool");
            return Ok((pool, ConnectionSource::External));
        }

        let config = self.config.resolved();
        config.validate()?;

        let url = connection_url(&config)?;
        let pool = Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| StorageError::configuration(format!("Failed to create Redis pool: {}", e)))?;

        debug!(address = %config.address, database = config.database, "Created Redis pool");

        Ok((pool, ConnectionSource::Owned(config)))
    }
}

impl fmt::Debug for RedisStorageOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStorageOptions")
            .field("config", &self.config)
            .field("pool", &self.pool.is_some())
            .finish()
    }
}

/// Builds a `redis://[:password@]host:port/db` URL.
///
/// The password is percent-encoded so it may contain any character.
pub(crate) fn connection_url(config: &StorageConfig) -> StorageResult<String> {
    let invalid = |reason: &str| {
        StorageError::configuration(format!("Invalid Redis address '{}': {}", config.address, reason))
    };

    let mut url = Url::parse(&format!("redis://{}", config.address)).map_err(|e| invalid(&e.to_string()))?;

    if url.host_str().map_or(true, str::is_empty)
        || !url.path().is_empty()
        || url.query().is_some()
        || url.fragment().is_some()
        || !url.username().is_empty()
        || url.password().is_some()
    {
        return Err(invalid("expected host:port"));
    }

    if let Some(password) = config.password.as_deref().filter(|p| !p.is_empty()) {
        url.set_password(Some(password))
            .map_err(|()| invalid("cannot carry a password"))?;
    }
    url.set_path(&format!("/{}", config.database));

    Ok(url.to_string())
}
