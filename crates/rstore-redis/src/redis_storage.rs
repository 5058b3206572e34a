//! Redis-based storage implementation.

use crate::options::{ConnectionSource, RedisStorageOptions};
use async_trait::async_trait;
use deadpool_redis::{Connection, Pool};
use redis::AsyncCommands;
use rstore_core::{Storage, StorageError, StorageResult};
use std::time::Duration;
use tracing::{debug, info};

/// Redis-backed [`Storage`].
///
/// Holds a single connection pool and no other state, so it can be shared
/// freely across tasks. Calls carry no timeout of their own; a stalled
/// server stalls the caller until the driver gives up.
pub struct RedisStorage {
    pool: Pool,
    source: ConnectionSource,
}

impl RedisStorage {
    /// Creates a Redis storage from the given options.
    ///
    /// No connection is opened here; use [`Self::ping`] to check
    /// reachability up front.
    pub fn new(options: RedisStorageOptions) -> StorageResult<Self> {
        let (pool, source) = options.resolve()?;

        match &source {
            ConnectionSource::Owned(config) => info!(
                address = %config.address,
                database = config.database,
                "Redis storage created"
            ),
            ConnectionSource::External => info!("Redis storage created on caller-supplied pool"),
        }

        Ok(Self { pool, source })
    }

    /// Returns the underlying connection pool for advanced setup.
    #[must_use]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Returns where the connection pool came from.
    #[must_use]
    pub fn connection_source(&self) -> &ConnectionSource {
        &self.source
    }

    /// Returns true if the pool was built by this storage rather than supplied.
    #[must_use]
    pub fn owns_pool(&self) -> bool {
        matches!(self.source, ConnectionSource::Owned(_))
    }

    /// Sends `PING` to the server.
    pub async fn ping(&self) -> StorageResult<()> {
        let mut conn = self.conn().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(StorageError::backend)?;
        Ok(())
    }

    /// Get a connection from the pool.
    async fn conn(&self) -> StorageResult<Connection> {
        self.pool.get().await.map_err(StorageError::backend)
    }
}

/// Longest expiry sent to Redis, in milliseconds.
///
/// Redis rejects `PX` values whose absolute expire time overflows `i64`
/// milliseconds, so longer TTLs are capped here and behave as "forever".
pub(crate) const MAX_TTL_MILLIS: u64 = i64::MAX as u64 / 2;

/// Converts a TTL to whole milliseconds, rounding sub-millisecond values up
/// and capping at [`MAX_TTL_MILLIS`].
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis())
        .unwrap_or(u64::MAX)
        .clamp(1, MAX_TTL_MILLIS)
}

#[async_trait]
impl Storage for RedisStorage {
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        let mut conn = self.conn().await?;
        let value: Option<Vec<u8>> = conn.get(key).await.map_err(StorageError::backend)?;

        match value {
            Some(value) => {
                debug!("Cache hit for key '{}'", key);
                Ok(value)
            }
            None => {
                debug!("Cache miss for key '{}'", key);
                Err(StorageError::NotFound)
            }
        }
    }

    /// Empty keys and values are sent to Redis as-is, which stores them
    /// like any other.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> StorageResult<()> {
        let mut conn = self.conn().await?;

        if ttl.is_zero() {
            conn.set::<_, _, ()>(key, value)
                .await
                .map_err(StorageError::backend)?;
            debug!("Stored key '{}' without expiration", key);
        } else {
            let millis = ttl_millis(ttl);
            conn.pset_ex::<_, _, ()>(key, value, millis)
                .await
                .map_err(StorageError::backend)?;
            debug!("Stored key '{}' with TTL {}ms", key, millis);
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let mut conn = self.conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(StorageError::backend)?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(())
    }

    /// Issues `FLUSHALL`.
    ///
    /// This wipes every key in every database of the Redis instance, not
    /// only keys written through this storage. Anything else sharing the
    /// instance loses its data too.
    async fn reset(&self) -> StorageResult<()> {
        let mut conn = self.conn().await?;
        redis::cmd("FLUSHALL")
            .query_async::<()>(&mut conn)
            .await
            .map_err(StorageError::backend)?;

        info!("Flushed all keys on the Redis instance");
        Ok(())
    }

    /// Closes the pool.
    ///
    /// A caller-supplied pool is closed for every holder. Later operations
    /// fail with [`deadpool_redis::PoolError::Closed`].
    async fn close(&self) -> StorageResult<()> {
        self.pool.close();
        info!(owned = self.owns_pool(), "Redis storage closed");
        Ok(())
    }
}
