//! Shared Cache
//!
//! Thread-safe handle serializing every cache call behind one async mutex.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio::task;

use crate::cache::{Cache, CacheKey, Entry, Statistics, Storage};
use crate::error::Result;

/// Cache shared across tasks.
///
/// Contains the cache wrapped in Arc<Mutex<>> so each call, including any
/// load and eviction it triggers, runs under a single lock acquisition.
/// Concurrent misses on one key are serialized, so the second caller sees the
/// first caller's loaded value as a hit.
///
/// The loader runs synchronously on the calling worker thread while the lock
/// is held. Use [`SharedCache::get_blocking`] when the loader does I/O.
pub struct SharedCache<K, V, M = HashMap<K, Entry<V>>> {
    inner: Arc<Mutex<Cache<K, V, M>>>,
}

impl<K, V, M> Clone for SharedCache<K, V, M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, M> SharedCache<K, V, M>
where
    K: CacheKey,
    M: Storage<K, V>,
{
    /// Creates a new SharedCache owning the given cache.
    pub fn new(cache: Cache<K, V, M>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// See [`Cache::get`].
    pub async fn get(&self, key: &K) -> Result<Option<V>>
    where
        V: Clone,
    {
        self.inner.lock().await.get(key)
    }

    /// Like [`SharedCache::get`], but runs the lookup inside
    /// [`task::block_in_place`] so a blocking loader does not stall the other
    /// tasks scheduled on this worker.
    ///
    /// # Panics
    /// Panics when called from a current-thread runtime.
    pub async fn get_blocking(&self, key: &K) -> Result<Option<V>>
    where
        V: Clone,
    {
        let mut cache = self.inner.lock().await;
        task::block_in_place(|| cache.get(key))
    }

    /// See [`Cache::add`].
    pub async fn add(&self, key: K, value: V) -> Result<()> {
        self.inner.lock().await.add(key, value)
    }

    /// See [`Cache::remove`].
    pub async fn remove(&self, key: &K) -> Result<Option<V>> {
        self.inner.lock().await.remove(key)
    }

    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }

    /// See [`Cache::refresh`].
    pub async fn refresh(&self) -> usize {
        self.inner.lock().await.refresh()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Returns a snapshot of the statistics taken under the lock.
    pub async fn statistics(&self) -> Statistics {
        self.inner.lock().await.statistics().clone()
    }

    /// Locks the cache for a sequence of calls that must not interleave with
    /// other tasks.
    pub async fn lock(&self) -> MutexGuard<'_, Cache<K, V, M>> {
        self.inner.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheBuilder, Capacity};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_cache(calls: Arc<AtomicUsize>) -> SharedCache<u32, String> {
        let cache = CacheBuilder::new()
            .loader(move |key: &u32| -> anyhow::Result<Option<String>> {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Some(format!("value_{}", key)))
            })
            .limit(Capacity::Size(16))
            .build();
        SharedCache::new(cache)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_get_blocking_with_slow_loader() {
        let cache = SharedCache::new(
            CacheBuilder::new()
                .loader(|key: &u32| -> anyhow::Result<Option<String>> {
                    std::thread::sleep(std::time::Duration::from_millis(20));
                    Ok(Some(format!("value_{}", key)))
                })
                .build(),
        );

        assert_eq!(
            cache.get_blocking(&1).await.unwrap(),
            Some("value_1".to_string())
        );
        assert_eq!(
            cache.get_blocking(&1).await.unwrap(),
            Some("value_1".to_string())
        );

        let stats = cache.statistics().await;
        assert_eq!(stats.hits(), 1);
        assert_eq!(stats.misses(), 1);
    }

    #[tokio::test]
    async fn test_shared_get_and_stats() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = counting_cache(calls.clone());

        assert_eq!(cache.get(&1).await.unwrap(), Some("value_1".to_string()));
        assert_eq!(cache.get(&1).await.unwrap(), Some("value_1".to_string()));

        let stats = cache.statistics().await;
        assert_eq!(stats.hits(), 1);
        assert_eq!(stats.misses(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shared_add_remove_clear() {
        let cache = counting_cache(Arc::new(AtomicUsize::new(0)));

        cache.add(1, "one".to_string()).await.unwrap();
        cache.add(2, "two".to_string()).await.unwrap();
        assert_eq!(cache.remove(&1).await.unwrap(), Some("one".to_string()));
        assert_eq!(cache.len().await, 1);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_misses_load_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = counting_cache(calls.clone());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.get(&7).await.unwrap() })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), Some("value_7".to_string()));
        }

        let stats = cache.statistics().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.hits(), 7);
    }

    #[tokio::test]
    async fn test_lock_groups_calls() {
        let cache = counting_cache(Arc::new(AtomicUsize::new(0)));

        {
            let mut guard = cache.lock().await;
            guard.add(1, "one".to_string()).unwrap();
            guard.add(2, "two".to_string()).unwrap();
            assert_eq!(guard.len(), 2);
        }

        assert_eq!(cache.len().await, 2);
    }
}
