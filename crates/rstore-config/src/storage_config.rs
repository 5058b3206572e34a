//! Backend connection settings.

use rstore_core::{StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address used when none is configured.
pub const DEFAULT_ADDRESS: &str = "localhost:6379";

/// Connection settings for a key-value backend.
///
/// `Debug` output masks the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend address as `host:port`.
    pub address: String,
    /// Logical database index.
    pub database: i64,
    /// Authentication secret, if the backend requires one.
    pub password: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            database: 0,
            password: None,
        }
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("address", &self.address)
            .field("database", &self.database)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl StorageConfig {
    /// Fills in defaults for blank settings.
    ///
    /// An empty address becomes [`DEFAULT_ADDRESS`] and an empty password
    /// means no password.
    #[must_use]
    pub fn resolved(mut self) -> Self {
        if self.address.trim().is_empty() {
            self.address = DEFAULT_ADDRESS.to_string();
        }
        if self.password.as_deref().is_some_and(str::is_empty) {
            self.password = None;
        }
        self
    }

    /// Checks the settings for values no backend would accept.
    pub fn validate(&self) -> StorageResult<()> {
        if self.address.trim().is_empty() {
            return Err(StorageError::configuration("Backend address is required"));
        }
        if self.database < 0 {
            return Err(StorageError::configuration(format!(
                "Database index must not be negative, got {}",
                self.database
            )));
        }
        Ok(())
    }
}
