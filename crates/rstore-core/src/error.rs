//! Error types surfaced by storage implementations.

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed backend error, kept opaque so the contract stays backend-agnostic.
pub type BackendError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors returned by storage implementations.
///
/// The five contract operations only ever produce [`StorageError::NotFound`]
/// (from `get`) or [`StorageError::Backend`]. Configuration errors are raised
/// while constructing a storage, never by an operation on it.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The key is absent or has expired. The two cases are indistinguishable.
    #[error("key not found")]
    NotFound,

    /// Any failure reported by the backend: network, authentication,
    /// protocol or closed-connection errors. The message is the backend's own.
    #[error(transparent)]
    Backend(BackendError),

    /// Invalid configuration detected while building a storage.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    /// Wraps a backend error without adding any context.
    #[must_use]
    pub fn backend<E: Into<BackendError>>(err: E) -> Self {
        Self::Backend(err.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if this is the normalized "key absent" error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns the underlying backend error, if any, for downcasting.
    #[must_use]
    pub fn backend_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Self::Backend(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Backend(_) => "BACKEND_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}
