//! Integration Tests for the public cache API
//!
//! Exercises `LruCache` through the crate's public surface only.

use std::sync::Once;
use std::thread::sleep;
use std::time::Duration;

use ttl_lru_cache::{Cache, CacheConfig, CacheError, LruCache};

// == Helper Functions ==

static TRACING: Once = Once::new();

/// Installs a subscriber honouring RUST_LOG, once per test binary.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn create_cache(capacity: usize) -> LruCache<String, i32> {
    init_tracing();
    LruCache::new(capacity, Duration::from_secs(3600)).unwrap()
}

// == Construction ==

#[test]
fn test_zero_capacity_fails_fast() {
    init_tracing();
    let result = LruCache::<String, i32>::new(0, Duration::from_secs(1));
    assert_eq!(result.unwrap_err(), CacheError::InvalidCapacity(0));
}

#[test]
fn test_construct_from_default_config() {
    init_tracing();
    let cache = LruCache::<String, i32>::from_config(&CacheConfig::default()).unwrap();

    assert_eq!(cache.capacity(), 1000);
    assert_eq!(cache.default_ttl(), Duration::from_secs(300));
    assert_eq!(cache.size(), 0);
}

// == Put / Get ==

#[test]
fn test_put_and_get() {
    let cache = create_cache(2);

    cache.put("a".to_string(), 1);

    assert_eq!(cache.size(), 1);
    assert_eq!(cache.get("a"), Some(1));
}

#[test]
fn test_get_missing_key() {
    let cache = create_cache(2);
    assert_eq!(cache.get("nope"), None);
}

// == LRU Order ==

#[test]
fn test_eviction_order() {
    let cache = create_cache(2);

    cache.put("a".to_string(), 1);
    cache.put("b".to_string(), 2);
    assert_eq!(cache.keys_by_recency()[0], "b");

    assert_eq!(cache.get("a"), Some(1));
    assert_eq!(cache.keys_by_recency()[0], "a");

    cache.put("c".to_string(), 3);
    assert_eq!(cache.keys_by_recency()[0], "c");

    assert_eq!(cache.get("b"), None);
    assert_eq!(cache.get("a"), Some(1));
    assert_eq!(cache.get("c"), Some(3));
}

#[test]
fn test_capacity_bound_with_distinct_keys() {
    let cache = create_cache(5);

    for i in 0..50 {
        cache.put(format!("key{}", i), i);
        assert!(cache.size() <= 5);
    }

    assert_eq!(cache.size(), 5);
    let expected: Vec<String> = (45..50).rev().map(|i| format!("key{}", i)).collect();
    assert_eq!(cache.keys_by_recency(), expected);
    assert_eq!(cache.stats().evictions, 45);
}

// == TTL ==

#[test]
fn test_ttl_eviction() {
    init_tracing();
    let cache: LruCache<String, i32> = LruCache::new(2, Duration::from_millis(50)).unwrap();

    cache.put("a".to_string(), 1);
    sleep(Duration::from_millis(60));

    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.size(), 0);
}

#[test]
fn test_expired_entry_counts_until_accessed() {
    let cache = create_cache(4);

    cache.put_with_ttl("a".to_string(), 1, Duration::from_millis(10));
    cache.put("b".to_string(), 2);
    sleep(Duration::from_millis(20));

    assert_eq!(cache.size(), 2);
    assert!(!cache.contains_key("a"));
    assert_eq!(cache.size(), 2);

    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.size(), 1);
}

#[test]
fn test_zero_ttl_is_never_observed() {
    let cache = create_cache(4);

    cache.put_with_ttl("a".to_string(), 1, Duration::ZERO);

    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.size(), 0);
}

#[test]
fn test_update_resets_value_ttl_and_recency() {
    init_tracing();
    let cache: LruCache<String, i32> = LruCache::new(2, Duration::from_millis(200)).unwrap();

    cache.put("a".to_string(), 1);
    cache.put("b".to_string(), 2);
    sleep(Duration::from_millis(120));

    cache.put("a".to_string(), 10);
    assert_eq!(cache.size(), 2);
    assert_eq!(cache.keys_by_recency(), vec!["a", "b"]);

    sleep(Duration::from_millis(120));
    assert_eq!(cache.get("a"), Some(10));
    assert_eq!(cache.get("b"), None);
}

#[test]
fn test_cleanup_expired_sweeps_untouched_entries() {
    let cache = create_cache(4);

    cache.put_with_ttl("a".to_string(), 1, Duration::from_millis(10));
    cache.put_with_ttl("b".to_string(), 2, Duration::from_millis(10));
    cache.put("c".to_string(), 3);
    sleep(Duration::from_millis(20));

    assert_eq!(cache.cleanup_expired(), 2);
    assert_eq!(cache.size(), 1);
    assert_eq!(cache.cleanup_expired(), 0);
}

// == Removal ==

#[test]
fn test_remove_absent_key_is_noop() {
    let cache = create_cache(4);

    cache.put("a".to_string(), 1);

    assert_eq!(cache.remove("a"), Some(1));
    assert_eq!(cache.remove("a"), None);
    assert_eq!(cache.remove("never"), None);
    assert_eq!(cache.size(), 0);
}

// == Trait ==

fn fill<C: Cache<u32, u32>>(cache: &C, n: u32) {
    for i in 0..n {
        cache.put(i, i * 10);
    }
}

#[test]
fn test_generic_over_cache_trait() {
    init_tracing();
    let cache: LruCache<u32, u32> = LruCache::new(3, Duration::from_secs(60)).unwrap();

    fill(&cache, 5);

    assert_eq!(Cache::size(&cache), 3);
    assert_eq!(Cache::get(&cache, &4), Some(40));
    assert_eq!(Cache::get(&cache, &0), None);
}

// == Stats ==

#[test]
fn test_stats_track_operations() {
    let cache = create_cache(1);

    cache.put("a".to_string(), 1);
    cache.get("a");
    cache.get("missing");
    cache.put("b".to_string(), 2);
    cache.put_with_ttl("b".to_string(), 3, Duration::ZERO);
    cache.get("b");

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.expirations, 1);
    assert_eq!(stats.total_entries, 0);
    assert_eq!(stats.hit_rate(), 1.0 / 3.0);
}
