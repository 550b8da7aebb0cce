//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod concurrent;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use concurrent::LruCache;
pub use entry::Entry;
pub use lru::{Iter, OrderedIndex};
pub use stats::CacheStats;
pub use store::CacheStore;
