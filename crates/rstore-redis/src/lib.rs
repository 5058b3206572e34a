//! # rstore Redis
//!
//! A [`Storage`] implementation backed by Redis.
//!
//! Two entry points are provided:
//! - [`new`] returns only the storage contract, for consumers that must not
//!   depend on Redis types;
//! - [`RedisStorage::new`] returns the concrete adapter, which also exposes
//!   the underlying connection pool for advanced setup.
//!
//! # Example
//!
//! ```rust,ignore
//! use rstore_redis::RedisStorageOptions;
//! use std::time::Duration;
//!
//! let storage = rstore_redis::new(
//!     RedisStorageOptions::new()
//!         .with_address("cache.internal:6379")
//!         .with_database(2),
//! )?;
//!
//! storage.set("session:42", b"payload", Duration::from_secs(60)).await?;
//! let value = storage.get("session:42").await?;
//! ```

mod options;
mod redis_storage;

pub use options::{ConnectionSource, RedisStorageOptions};
pub use redis_storage::RedisStorage;

pub use deadpool_redis::{Pool, PoolError};

use rstore_core::{Storage, StorageResult};
use std::sync::Arc;

/// Builds a Redis storage exposed only through the [`Storage`] contract.
pub fn new(options: RedisStorageOptions) -> StorageResult<Arc<dyn Storage>> {
    Ok(Arc::new(RedisStorage::new(options)?))
}
