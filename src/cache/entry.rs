//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support and
//! the link fields that place them in the recency list.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached mapping together with its position in the recency list.
///
/// `prev` and `next` are slot handles into the owning
/// [`OrderedIndex`](crate::cache::OrderedIndex), not pointers.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    /// The key this entry is stored under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Expiration instant, None = never expires
    pub expires_at: Option<Instant>,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates a new unlinked entry that expires `ttl` after `now`.
    ///
    /// A TTL so large that the deadline cannot be represented leaves the
    /// entry without an expiration.
    pub fn new(key: K, value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            key,
            value,
            expires_at: now.checked_add(ttl),
            prev: None,
            next: None,
        }
    }

    // == Refresh ==
    /// Replaces the value and restarts the TTL from `now`.
    pub fn refresh(&mut self, value: V, ttl: Duration, now: Instant) -> V {
        self.expires_at = now.checked_add(ttl);
        std::mem::replace(&mut self.value, value)
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry whose deadline equals `now` is already
    /// expired, so a zero TTL is never observable by a later lookup.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => expires <= now,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if the entry never expires.
    ///
    /// Returns `Some(Duration::ZERO)` once the deadline has passed.
    pub fn ttl_remaining_at(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }
}
