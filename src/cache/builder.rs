//! Cache Builder Module
//!
//! Configures and builds a [`Cache`].

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::cache::listener::Listeners;
use crate::cache::{
    Cache, CacheKey, Capacity, Entry, EvictionPolicy, Limit, Listener, Loader, NotFound, Policy,
    Storage, Weigher, ZeroWeigher,
};
use crate::config::Config;

/// Builder for configuring a Cache.
///
/// Defaults: a loader that never finds anything, a weigher returning zero,
/// no limit, least-recently-used eviction and `HashMap` storage.
///
/// # Example
///
/// ```
/// use mini_cache::cache::{CacheBuilder, Capacity, Policy};
///
/// let cache = CacheBuilder::new()
///     .loader(|path: &String| -> anyhow::Result<Option<String>> {
///         Ok(std::fs::read_to_string(path).ok())
///     })
///     .weigher(|contents: &String| contents.len() as u64)
///     .limit(Capacity::Weight(64 * 1024))
///     .policy(Policy::Lfu)
///     .build();
///
/// assert!(cache.is_empty());
/// ```
pub struct CacheBuilder<K, V, M = HashMap<K, Entry<V>>> {
    loader: Box<dyn Loader<K, V>>,
    weigher: Box<dyn Weigher<V>>,
    limit: Box<dyn Limit>,
    policy: Box<dyn EvictionPolicy<V>>,
    listeners: Listeners<K>,
    storage: PhantomData<fn() -> M>,
}

impl<K: CacheKey, V> CacheBuilder<K, V> {
    /// Creates a builder with every option at its default.
    pub fn new() -> Self {
        Self {
            loader: Box::new(NotFound),
            weigher: Box::new(ZeroWeigher),
            limit: Box::new(Capacity::Unlimited),
            policy: Box::new(Policy::Lru),
            listeners: Listeners::new(),
            storage: PhantomData,
        }
    }

    /// Creates a builder with the limit and policy taken from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new().config(config)
    }
}

impl<K: CacheKey, V> Default for CacheBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, M> CacheBuilder<K, V, M>
where
    K: CacheKey,
    M: Storage<K, V> + Default,
{
    /// Set the loader for missing keys.
    ///
    /// Default: always "not found".
    pub fn loader(mut self, loader: impl Loader<K, V> + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Set the weigher for new entries.
    ///
    /// Default: zero for every value.
    pub fn weigher(mut self, weigher: impl Weigher<V> + 'static) -> Self {
        self.weigher = Box::new(weigher);
        self
    }

    /// Set the limit deciding when the cache is full.
    ///
    /// Default: [`Capacity::Unlimited`].
    pub fn limit(mut self, limit: impl Limit + 'static) -> Self {
        self.limit = Box::new(limit);
        self
    }

    /// Set the eviction policy scoring entries when the cache is full.
    ///
    /// Default: [`Policy::Lru`].
    pub fn policy(mut self, policy: impl EvictionPolicy<V> + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Register a listener on the built cache.
    pub fn listener(mut self, listener: Arc<dyn Listener<K>>) -> Self {
        self.listeners.add(listener);
        self
    }

    /// Apply the limit and policy from a [`Config`].
    pub fn config(self, config: &Config) -> Self {
        self.limit(config.limit).policy(config.policy)
    }

    /// Switch the underlying storage type.
    ///
    /// The cache starts from `N::default()`.
    pub fn storage<N>(self) -> CacheBuilder<K, V, N>
    where
        N: Storage<K, V> + Default,
    {
        CacheBuilder {
            loader: self.loader,
            weigher: self.weigher,
            limit: self.limit,
            policy: self.policy,
            listeners: self.listeners,
            storage: PhantomData,
        }
    }

    /// Build the cache with the configured settings.
    pub fn build(self) -> Cache<K, V, M> {
        Cache::from_parts(
            M::default(),
            self.loader,
            self.weigher,
            self.limit,
            self.policy,
            self.listeners,
        )
    }
}
