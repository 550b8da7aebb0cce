//! Cache Store Module
//!
//! Main cache engine combining HashMap lookup with the LRU ordered index and
//! lazy TTL expiration. `CacheStore` is not synchronized; see
//! [`LruCache`](crate::cache::LruCache) for the shared version.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{CacheStats, Entry, OrderedIndex};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Capacity-bounded storage with LRU eviction and per-entry TTL.
///
/// The map's key set always equals the set of keys linked in the index, and
/// both hold at most `capacity` entries whenever no call is in progress.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to slot handle in `index`
    map: HashMap<K, usize>,
    /// Entries ordered by recency
    index: OrderedIndex<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL applied by `put`
    default_ttl: Duration,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize, default_ttl: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        debug!(capacity, ?default_ttl, "cache store created");

        Ok(Self {
            map: HashMap::new(),
            index: OrderedIndex::new(),
            stats: CacheStats::new(),
            capacity,
            default_ttl,
        })
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// An entry whose TTL has elapsed is removed and reported as absent.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let now = Instant::now();

        let Some(&handle) = self.map.get(key) else {
            self.stats.record_miss();
            trace!("cache miss");
            return None;
        };

        let expired = match self.index.get(handle) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                // Stale handle: drop the mapping so the key is absent
                self.map.remove(key);
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_handle(handle);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            debug!(size = self.index.len(), "expired entry reaped on access");
            return None;
        }

        self.index.move_to_front(handle);
        self.stats.record_hit();
        trace!("cache hit");
        self.index.get(handle).map(|entry| entry.value.clone())
    }

    // == Put ==
    /// Stores a key-value pair using the default TTL.
    pub fn put(&mut self, key: K, value: V) {
        let ttl = self.default_ttl;
        self.put_with_ttl(key, value, ttl);
    }

    /// Stores a key-value pair that expires after `ttl`.
    ///
    /// If the key already exists, the value is overwritten, its TTL restarts
    /// and it becomes most recently used. Otherwise the entry is inserted at
    /// the front, and the least recently used entry is evicted if that
    /// pushes the population past capacity.
    pub fn put_with_ttl(&mut self, key: K, value: V, ttl: Duration) {
        let now = Instant::now();

        if let Some(&handle) = self.map.get(&key) {
            if let Some(entry) = self.index.get_mut(handle) {
                entry.refresh(value, ttl, now);
            }
            self.index.move_to_front(handle);
            return;
        }

        let handle = self.index.push_front(Entry::new(key.clone(), value, ttl, now));
        self.map.insert(key, handle);

        // A single insert can overflow by at most one entry.
        if self.index.len() > self.capacity {
            self.evict_oldest();
        }
    }

    // == Size ==
    /// Returns the current number of entries, including expired entries
    /// that have not been looked up or swept yet.
    pub fn size(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Remove ==
    /// Removes an entry by key, returning its value if it was still fresh.
    ///
    /// Removing an absent key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        let handle = self.map.remove(key)?;
        let entry = self.index.remove(handle)?;

        if entry.is_expired_at(now) {
            self.stats.record_expirations(1);
            None
        } else {
            Some(entry.value)
        }
    }

    // == Contains ==
    /// Checks whether a fresh entry exists, without touching recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.peek(key).is_some()
    }

    // == Peek ==
    /// Returns a fresh entry's value without marking it recently used.
    ///
    /// Expired entries are reported as absent but left for a later `get`
    /// or sweep to reap.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        let handle = *self.map.get(key)?;
        self.index
            .get(handle)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| &entry.value)
    }

    // == TTL Remaining ==
    /// Returns the remaining lifetime of an entry, or None if it is absent,
    /// expired, or never expires.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        let handle = *self.map.get(key)?;
        self.index
            .get(handle)
            .filter(|entry| !entry.is_expired_at(now))
            .and_then(|entry| entry.ttl_remaining_at(now))
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<usize> = self
            .map
            .values()
            .copied()
            .filter(|&handle| {
                self.index
                    .get(handle)
                    .map_or(false, |entry| entry.is_expired_at(now))
            })
            .collect();

        let count = expired.len();
        for handle in expired {
            self.remove_handle(handle);
        }

        self.stats.record_expirations(count);
        count
    }

    // == Clear ==
    /// Removes every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.map.clear();
        self.index.clear();
    }

    // == Keys By Recency ==
    /// Returns all keys, most recently used first.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.index.keys().cloned().collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    /// Maximum number of entries held after any operation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// TTL applied by [`put`](Self::put).
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn evict_oldest(&mut self) {
        if let Some(entry) = self.index.pop_back() {
            self.map.remove(&entry.key);
            self.stats.record_eviction();
            debug!(capacity = self.capacity, "evicted least recently used entry");
        }
    }

    // Drops an entry from both the index and the map.
    fn remove_handle(&mut self, handle: usize) -> Option<Entry<K, V>> {
        let entry = self.index.remove(handle)?;
        self.map.remove(&entry.key);
        Some(entry)
    }

    /// Panics if the map and the index disagree.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.map.len(), self.index.len(), "map/index size mismatch");
        assert!(self.index.len() <= self.capacity, "capacity exceeded");

        let mut seen = std::collections::HashSet::new();
        for entry in self.index.iter() {
            assert!(seen.insert(&entry.key), "duplicate key in index");
            let handle = self.map.get(&entry.key).expect("index key missing from map");
            let mapped = self.index.get(*handle).expect("map points at vacant slot");
            assert!(mapped.key == entry.key, "map points at wrong entry");
        }
        assert_eq!(seen.len(), self.map.len(), "index does not cover map");
    }
}
