//! Cache Store Module
//!
//! Main cache engine: lookup-or-load, insertion with score-based eviction,
//! statistics and listener notification.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cache::listener::Listeners;
use crate::cache::{
    CacheBuilder, CacheKey, Entry, Event, EvictionPolicy, Limit, Listener, Loader, Statistics,
    Storage, Weigher,
};
use crate::error::{CacheError, Result};

// == Cache ==
/// Bounded in-memory cache with pluggable loading, weighing and eviction.
///
/// All mutating operations take `&mut self`: the cache is single-writer and
/// each call (including any loads and evictions it triggers) is one atomic
/// unit. Wrap it in a [`SharedCache`](crate::shared::SharedCache) to use it
/// from several tasks.
///
/// # Example
///
/// ```
/// use mini_cache::cache::{CacheBuilder, Capacity, Policy};
///
/// let mut cache = CacheBuilder::new()
///     .loader(|key: &u32| -> anyhow::Result<Option<String>> { Ok(Some(key.to_string())) })
///     .limit(Capacity::Size(1))
///     .policy(Policy::Lru)
///     .build();
///
/// assert_eq!(cache.get(&1).unwrap(), Some("1".to_string()));
/// assert_eq!(cache.get(&2).unwrap(), Some("2".to_string()));
/// assert_eq!(cache.len(), 1);
/// assert_eq!(cache.statistics().eviction_count(), 1);
/// ```
pub struct Cache<K, V, M = HashMap<K, Entry<V>>> {
    /// Key to entry storage
    entries: M,
    loader: Box<dyn Loader<K, V>>,
    weigher: Box<dyn Weigher<V>>,
    limit: Box<dyn Limit>,
    policy: Box<dyn EvictionPolicy<V>>,
    listeners: Listeners<K>,
    stats: Statistics,
    /// Logical clock, bumped on every insertion and hit
    clock: u64,
}

impl<K: CacheKey, V> Cache<K, V> {
    /// Starts building a cache backed by a `HashMap`.
    pub fn builder() -> CacheBuilder<K, V> {
        CacheBuilder::new()
    }
}

impl<K, V, M> Cache<K, V, M>
where
    K: CacheKey,
    M: Storage<K, V>,
{
    pub(crate) fn from_parts(
        entries: M,
        loader: Box<dyn Loader<K, V>>,
        weigher: Box<dyn Weigher<V>>,
        limit: Box<dyn Limit>,
        policy: Box<dyn EvictionPolicy<V>>,
        listeners: Listeners<K>,
    ) -> Self {
        Self {
            entries,
            loader,
            weigher,
            limit,
            policy,
            listeners,
            stats: Statistics::new(),
            clock: 0,
        }
    }

    // == Get ==
    /// Looks up a value, loading it on a miss.
    ///
    /// A hit refreshes the entry's access bookkeeping and never evicts. A miss
    /// consults the loader; a loaded value is inserted exactly like
    /// [`add`](Self::add). Returns `Ok(None)` when the loader has no value.
    ///
    /// # Errors
    /// `InvalidArgument` for an invalid key, `Listener` if a listener rejects
    /// an event raised while inserting the loaded value.
    pub fn get(&mut self, key: &K) -> Result<Option<V>>
    where
        V: Clone,
    {
        validate(key)?;

        let tick = self.next_tick();
        if let Some(entry) = self.entries.get_mut(key) {
            entry.touch(tick);
            self.stats.record_hit();
            return Ok(Some(entry.value().clone()));
        }

        self.stats.record_miss();
        match self.fetch(key) {
            Some(value) => {
                self.insert(key.clone(), value.clone())?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    // == Add ==
    /// Inserts a value directly, replacing any entry already held for `key`.
    ///
    /// A replaced entry is dropped silently before the eviction pass, so an
    /// overwrite never reports its own key as evicted. Fires `Added`.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        validate(&key)?;
        self.insert(key, value)
    }

    // == Remove ==
    /// Removes an entry, returning its value. Absent keys are not an error.
    pub fn remove(&mut self, key: &K) -> Result<Option<V>> {
        validate(key)?;
        Ok(self.entries.remove(key).map(|entry| {
            self.stats.subtract_weight(entry.weight());
            entry.into_value()
        }))
    }

    // == Clear ==
    /// Discards every entry. Lifetime counters are kept; only the weight resets.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.reset_weight();
    }

    // == Prefetch ==
    /// Loads every key that is not already cached.
    ///
    /// Loads are not lookups, so hits and misses are untouched; loader
    /// failures still count as errors. Every key is validated before anything
    /// is loaded. Returns the number of entries added.
    pub fn prefetch<I>(&mut self, keys: I) -> Result<usize>
    where
        I: IntoIterator<Item = K>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        keys.iter().try_for_each(validate)?;

        let mut loaded = 0;
        for key in keys {
            if self.entries.get(&key).is_some() {
                continue;
            }
            if let Some(value) = self.fetch(&key) {
                self.insert(key, value)?;
                loaded += 1;
            }
        }

        debug!("Prefetch loaded {} entries", loaded);
        Ok(loaded)
    }

    // == Refresh ==
    /// Reloads every cached entry through the loader.
    ///
    /// A reloaded value replaces its entry (re-weighed, access count reset).
    /// When the loader fails the old entry is kept and an error is counted.
    /// No lookups are counted, nothing is evicted and no events fire.
    ///
    /// Returns the number of entries reloaded.
    pub fn refresh(&mut self) -> usize {
        let keys: Vec<K> = self.entries.iter().map(|(key, _)| key.clone()).collect();
        let total = keys.len();

        let mut reloaded = 0;
        for key in keys {
            let Some(value) = self.fetch(&key) else {
                continue;
            };
            let weight = self.weigher.weigh(&value);
            let tick = self.next_tick();
            if let Some(previous) = self.entries.insert(key, Entry::new(value, weight, tick)) {
                self.stats.subtract_weight(previous.weight());
            }
            self.stats.add_weight(weight);
            reloaded += 1;
        }

        info!("Refresh reloaded {} of {} entries", reloaded, total);
        reloaded
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` is cached. Counts no lookup.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.get(key).is_some()
    }

    /// Iterates over the cached keys, in storage order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Returns a cached value without counting a lookup or touching the entry.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(Entry::value)
    }

    /// Returns the entry held for `key`, bookkeeping included.
    pub fn entry(&self, key: &K) -> Option<&Entry<V>> {
        self.entries.get(key)
    }

    // == Stats ==
    /// Returns the live cache statistics.
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    // == Listeners ==
    /// Registers a listener. The same listener may be registered more than once.
    pub fn add_listener(&mut self, listener: Arc<dyn Listener<K>>) {
        self.listeners.add(listener);
    }

    /// Unregisters one registration of `listener`, matched by identity.
    ///
    /// Returns false if it was not registered.
    pub fn remove_listener(&mut self, listener: &Arc<dyn Listener<K>>) -> bool {
        self.listeners.remove(listener)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn next_tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    // == Fetch ==
    /// Runs the loader, timing it and counting a failed load as an error.
    fn fetch(&mut self, key: &K) -> Option<V> {
        let start = Instant::now();
        let result = self.loader.load(key);
        self.stats.record_loading_time(start.elapsed());

        match result {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                debug!("Loader has no value for {:?}", key);
                self.stats.record_error();
                None
            }
            Err(err) => {
                warn!("Loader failed for {:?}: {:#}", key, err);
                self.stats.record_error();
                None
            }
        }
    }

    // == Insert ==
    /// Weighs, makes room, inserts, updates statistics, then fires `Added`.
    fn insert(&mut self, key: K, value: V) -> Result<()> {
        let weight = self.weigher.weigh(&value);
        if let Some(previous) = self.entries.remove(&key) {
            self.stats.subtract_weight(previous.weight());
        }

        self.evict()?;

        let tick = self.next_tick();
        self.entries.insert(key.clone(), Entry::new(value, weight, tick));
        self.stats.add_weight(weight);
        self.stats.track_size(self.entries.len());

        self.listeners.broadcast(Event::Added, &key)
    }

    // == Evict ==
    /// Evicts entries in ascending `(score, tick)` order until the limit is no
    /// longer full.
    ///
    /// Every resident entry is scored and sorted up front; the limit is
    /// re-checked after each eviction.
    fn evict(&mut self) -> Result<()> {
        if self.entries.is_empty() {
            return Ok(());
        }

        let mut scored: Vec<(u64, u64, K)> = self
            .entries
            .iter()
            .map(|(key, entry)| (self.policy.score(entry), entry.tick(), key.clone()))
            .collect();
        scored.sort_unstable_by_key(|(score, tick, _)| (*score, *tick));

        let mut candidates = scored.into_iter().map(|(_, _, key)| key);
        while !self.entries.is_empty() && self.limit.is_full(self.entries.len(), &self.stats) {
            let Some(key) = candidates.next() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&key) {
                self.stats.subtract_weight(entry.weight());
                self.stats.record_eviction();
                debug!("Evicted {:?} (weight {})", key, entry.weight());
                self.listeners.broadcast(Event::Evicted, &key)?;
            }
        }

        Ok(())
    }
}

impl<K, V, M> fmt::Debug for Cache<K, V, M>
where
    K: CacheKey,
    M: Storage<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("len", &self.entries.len())
            .field("listeners", &self.listeners)
            .field("statistics", &self.stats)
            .finish()
    }
}

fn validate<K: CacheKey>(key: &K) -> Result<()> {
    if key.is_valid() {
        Ok(())
    } else {
        Err(CacheError::InvalidArgument(format!(
            "cache does not support key {:?}",
            key
        )))
    }
}
