//! TTL LRU Cache - a thread-safe, capacity-bounded key/value cache
//!
//! Entries are evicted least-recently-used first once capacity is reached,
//! and expire after a per-entry TTL. Expiry is lazy: an expired entry is
//! reaped when it is next looked up, or by the optional cleanup task.

use std::time::Duration;

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, CacheStore, LruCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;

// == Cache Trait ==
/// The shared-access cache contract.
///
/// Lookups report absence, whether the key is missing or expired, as `None`.
/// Writes never fail.
pub trait Cache<K, V> {
    /// Returns the value for `key` if present and fresh, marking it most
    /// recently used.
    fn get(&self, key: &K) -> Option<V>;

    /// Stores `value` under `key` with the cache's default TTL.
    fn put(&self, key: K, value: V);

    /// Stores `value` under `key`, expiring after `ttl`.
    fn put_with_ttl(&self, key: K, value: V, ttl: Duration);

    /// Number of entries held, including expired entries not yet reaped.
    fn size(&self) -> usize;
}
