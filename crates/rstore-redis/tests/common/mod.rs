//! Common test infrastructure for Redis integration tests.

use deadpool_redis::{Config, Pool, Runtime};
use rstore_redis::{RedisStorage, RedisStorageOptions};
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::{Redis, REDIS_PORT};

/// Test Redis container wrapper.
///
/// Each instance runs its own Redis server, so `FLUSHALL` in one test never
/// touches another.
pub struct TestRedis {
    _container: ContainerAsync<Redis>,
    address: String,
}

impl TestRedis {
    /// Starts a fresh Redis container.
    pub async fn new() -> Self {
        let _ = rstore_core::telemetry::init_tracing();

        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(REDIS_PORT)
            .await
            .expect("Failed to get Redis port");

        Self {
            _container: container,
            address: format!("127.0.0.1:{}", port),
        }
    }

    /// Builds options pointing at the container.
    pub fn options(&self) -> RedisStorageOptions {
        RedisStorageOptions::new().with_address(self.address.clone())
    }

    /// Builds a storage that owns its pool.
    pub async fn storage(&self) -> RedisStorage {
        let storage = RedisStorage::new(self.options()).expect("Failed to create storage");
        storage.ping().await.expect("Redis did not answer PING");
        storage
    }

    /// Builds a pool the test owns, for handing to a storage.
    pub fn pool(&self, database: i64) -> Pool {
        Config::from_url(format!("redis://{}/{}", self.address, database))
            .create_pool(Some(Runtime::Tokio1))
            .expect("Failed to create Redis pool")
    }
}
