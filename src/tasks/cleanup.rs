//! TTL Cleanup Task
//!
//! Optional background task that periodically removes expired cache entries.
//! Lookups reap expired entries on their own; the sweep only keeps `size`
//! close to the number of fresh entries for keys nobody asks for again.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LruCache;

/// Spawns a tokio task that sweeps expired entries every `interval`.
///
/// Each sweep holds the cache lock for one pass over the entries. The task
/// runs until the returned handle is aborted.
///
/// Must be called from within a tokio runtime.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(LruCache::new(1000, Duration::from_secs(300))?);
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<K, V>(cache: Arc<LruCache<K, V>>, interval: Duration) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Send + 'static,
{
    tokio::spawn(async move {
        info!(?interval, "starting TTL cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired();

            if removed > 0 {
                info!(removed, "TTL cleanup removed expired entries");
            } else {
                debug!("TTL cleanup found no expired entries");
            }
        }
    })
}
