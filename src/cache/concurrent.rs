//! Concurrent Cache Module
//!
//! Thread-safe wrapper that guards a [`CacheStore`] with a single lock.

use std::borrow::Borrow;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::Cache;

// == LRU Cache ==
/// A thread-safe, capacity-bounded cache with LRU eviction and TTL expiry.
///
/// The map and the recency list live together inside one `Mutex`, so every
/// operation, lookups and `size` included, holds the lock exclusively for
/// its whole duration. Lookups reorder the list and reap expired entries, so
/// there is no shared read path.
///
/// The lock does not poison: a panic inside an operation releases it on
/// unwind. Share between threads with `Arc`.
#[derive(Debug)]
pub struct LruCache<K, V> {
    inner: Mutex<CacheStore<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new cache with the given capacity and default TTL.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize, default_ttl: Duration) -> Result<Self> {
        Ok(Self::from_store(CacheStore::new(capacity, default_ttl)?))
    }

    /// Creates a new cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.capacity, config.default_ttl)
    }

    /// Wraps an existing store.
    pub fn from_store(store: CacheStore<K, V>) -> Self {
        Self {
            inner: Mutex::new(store),
        }
    }

    // == Get ==
    /// Retrieves a clone of a fresh value and marks it most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key)
    }

    // == Put ==
    /// Stores a key-value pair using the default TTL.
    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    /// Stores a key-value pair that expires after `ttl`.
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.inner.lock().put_with_ttl(key, value, ttl);
    }

    // == Size ==
    /// Returns the number of entries not yet reaped.
    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    // == Remove ==
    /// Removes an entry by key, returning its value if it was still fresh.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    /// Checks whether a fresh entry exists, without touching recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains_key(key)
    }

    /// Returns a clone of a fresh value without marking it recently used.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Returns the remaining lifetime of a fresh entry.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().ttl_remaining(key)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        self.inner.lock().cleanup_expired()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Returns all keys, most recently used first.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.inner.lock().keys_by_recency()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn default_ttl(&self) -> Duration {
        self.inner.lock().default_ttl()
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn get(&self, key: &K) -> Option<V> {
        LruCache::get(self, key)
    }

    fn put(&self, key: K, value: V) {
        LruCache::put(self, key, value);
    }

    fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        LruCache::put_with_ttl(self, key, value, ttl);
    }

    fn size(&self) -> usize {
        LruCache::size(self)
    }
}
