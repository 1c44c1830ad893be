//! Refresh Task
//!
//! Background task that periodically reloads every cached entry.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheKey, Storage};
use crate::shared::SharedCache;

/// Spawns a background task that periodically refreshes the cache.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between refresh runs. Each run holds the cache lock for the whole pass, so
/// callers never observe a partially refreshed cache.
///
/// # Arguments
/// * `cache` - Shared handle to the cache
/// * `refresh_interval_secs` - Interval in seconds between refresh runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = SharedCache::new(CacheBuilder::new().loader(loader).build());
/// let refresh_handle = spawn_refresh_task(cache.clone(), 60);
/// // Later, during shutdown:
/// refresh_handle.abort();
/// ```
pub fn spawn_refresh_task<K, V, M>(
    cache: SharedCache<K, V, M>,
    refresh_interval_secs: u64,
) -> JoinHandle<()>
where
    K: CacheKey + Send + 'static,
    V: Send + 'static,
    M: Storage<K, V> + Send + 'static,
{
    let interval = Duration::from_secs(refresh_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting refresh task with interval of {} seconds",
            refresh_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let reloaded = cache.refresh().await;
            if reloaded > 0 {
                debug!("Refresh task reloaded {} entries", reloaded);
            }
        }
    })
}
