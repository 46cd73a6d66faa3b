//! Alert deduplication cache

use moka::future::Cache;
use std::time::Duration;

/// Shared cache used to drop repeats of an alert.
///
/// Implementations backed by an external store (Redis and the like) live
/// with the caller; the crate ships an in-process one.
#[async_trait::async_trait]
pub trait DedupCache: Send + Sync + std::fmt::Debug {
    /// Mark `key` as seen. Returns `true` if it was already seen and still live.
    async fn check_and_set(&self, key: &str) -> bool;
}

/// In-process dedup cache with a fixed time-to-live
#[derive(Debug, Clone)]
pub struct MokaDedupCache {
    seen: Cache<String, ()>,
}

impl MokaDedupCache {
    const DEFAULT_CAPACITY: u64 = 10_000;

    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(ttl: Duration, max_capacity: u64) -> Self {
        Self {
            seen: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }
}

#[async_trait::async_trait]
impl DedupCache for MokaDedupCache {
    async fn check_and_set(&self, key: &str) -> bool {
        let entry = self.seen.entry(key.to_string()).or_insert(()).await;
        !entry.is_fresh()
    }
}
