//! Configuration loader with layered sources.

use crate::StorageConfig;
use config::{Config, ConfigError, Environment, File};
use rstore_core::{StorageError, StorageResult};
use std::path::PathBuf;
use tracing::{debug, info};

/// Prefix for environment variable overrides.
pub const DEFAULT_ENV_PREFIX: &str = "RSTORE";

/// Loads [`StorageConfig`] from files and environment variables.
///
/// Sources are applied in order, later ones overriding earlier ones:
/// 1. `{dir}/default.toml`
/// 2. `{dir}/{environment}.toml`
/// 3. `{dir}/local.toml` (not meant for version control)
/// 4. Environment variables such as `RSTORE__ADDRESS`, `RSTORE__DATABASE`
///    and `RSTORE__PASSWORD`
///
/// Missing files are skipped. A `.env` file in the working directory is
/// loaded into the process environment first.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    env_prefix: String,
    environment: String,
}

impl ConfigLoader {
    /// Creates a loader reading from `config_dir`.
    ///
    /// The environment name comes from `RSTORE_ENVIRONMENT` and defaults to
    /// `development`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        let environment =
            std::env::var(format!("{}_ENVIRONMENT", DEFAULT_ENV_PREFIX)).unwrap_or_else(|_| "development".to_string());

        Self {
            config_dir: config_dir.into(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            environment,
        }
    }

    /// Creates a loader reading from `./config`.
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Overrides the environment variable prefix.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Overrides the environment name used to pick `{environment}.toml`.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Loads, resolves and validates the configuration.
    pub fn load(&self) -> StorageResult<StorageConfig> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        info!(
            config_dir = %self.config_dir.display(),
            environment = %self.environment,
            "Loading storage configuration"
        );

        let mut builder = Config::builder();

        for name in ["default", self.environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{}.toml", name));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config: StorageConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_storage_error)?;

        let config = config.resolved();
        config.validate()?;

        debug!(address = %config.address, database = config.database, "Storage configuration loaded");

        Ok(config)
    }
}

fn config_error_to_storage_error(err: ConfigError) -> StorageError {
    StorageError::Configuration(err.to_string())
}
