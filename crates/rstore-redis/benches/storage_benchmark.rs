//! Storage Benchmark: set/get/delete round-trips against Redis
//!
//! Needs a Redis server on `localhost:6379`.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench --package rstore-redis
//!
//! # Save a baseline for comparison
//! cargo bench --package rstore-redis -- --save-baseline main
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rstore_core::Storage;
use rstore_redis::{RedisStorage, RedisStorageOptions};
use std::time::Duration;
use tokio::runtime::Runtime;
use uuid::Uuid;

const KEY_COUNT: usize = 1000;
const VALUE: &[u8] = b"super good value for purpose of testing /s";
const TTL: Duration = Duration::from_secs(2);

fn bench_storage(c: &mut Criterion) {
    let runtime = Runtime::new().expect("Failed to build tokio runtime");
    let storage = RedisStorage::new(RedisStorageOptions::new()).expect("Failed to create storage");
    runtime
        .block_on(storage.ping())
        .expect("Redis must be running on localhost:6379");

    let keys: Vec<String> = (0..KEY_COUNT).map(|_| Uuid::new_v4().to_string()).collect();

    let mut group = c.benchmark_group("redis_storage");
    group.throughput(Throughput::Elements(KEY_COUNT as u64));

    let storage = &storage;
    let keys = &keys;

    group.bench_function(BenchmarkId::new("set_get_delete", KEY_COUNT), |b| {
        b.to_async(&runtime).iter(|| async move {
            for key in keys {
                storage.set(key, VALUE, TTL).await.unwrap();
            }
            for key in keys {
                let _ = storage.get(key).await;
            }
            for key in keys {
                storage.delete(key).await.unwrap();
            }
        });
    });

    group.bench_function(BenchmarkId::new("get_missing", KEY_COUNT), |b| {
        b.to_async(&runtime).iter(|| async move {
            for key in keys {
                let _ = storage.get(key).await;
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_storage);
criterion_main!(benches);
