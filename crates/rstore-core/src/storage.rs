//! The storage contract consumed by generic callers.

use crate::{StorageError, StorageResult};
use async_trait::async_trait;
use std::time::Duration;

/// Key-value storage with expiring entries.
///
/// Implementations translate these operations onto a concrete backend and
/// normalize its "key absent" signal into [`StorageError::NotFound`]. Every
/// other backend failure is surfaced as [`StorageError::Backend`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    /// Gets the value stored under `key`.
    ///
    /// Returns [`StorageError::NotFound`] if the key does not exist or has
    /// expired.
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// A zero `ttl` means the entry never expires.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> StorageResult<()>;

    /// Deletes the value stored under `key`.
    ///
    /// Deleting a key that does not exist is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Removes every entry the backend holds.
    ///
    /// Implementations may wipe more than the keys written through this
    /// storage; see the implementation's documentation for its scope.
    async fn reset(&self) -> StorageResult<()>;

    /// Releases the backend connection.
    ///
    /// Operations issued after `close` fail with a backend error.
    async fn close(&self) -> StorageResult<()>;
}

/// Convenience methods available on every [`Storage`].
#[async_trait]
pub trait StorageExt: Storage {
    /// Gets the value stored under `key`, mapping a missing key to `None`.
    async fn get_optional(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        match self.get(key).await {
            Ok(value) => Ok(Some(value)),
            Err(StorageError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

impl<T: Storage + ?Sized> StorageExt for T {}
