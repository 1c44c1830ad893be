//! Storage Module
//!
//! The map a cache keeps its entries in. Any keyed map works; eviction order
//! never depends on the map's iteration order.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::cache::Entry;

// == Storage ==
/// Underlying key to entry map of a cache.
pub trait Storage<K, V> {
    fn get(&self, key: &K) -> Option<&Entry<V>>;

    fn get_mut(&mut self, key: &K) -> Option<&mut Entry<V>>;

    /// Inserts an entry, returning the one it replaced.
    fn insert(&mut self, key: K, entry: Entry<V>) -> Option<Entry<V>>;

    fn remove(&mut self, key: &K) -> Option<Entry<V>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a K, &'a Entry<V>)> + 'a>;
}

impl<K, V, S> Storage<K, V> for HashMap<K, Entry<V>, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn get(&self, key: &K) -> Option<&Entry<V>> {
        HashMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut Entry<V>> {
        HashMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, entry: Entry<V>) -> Option<Entry<V>> {
        HashMap::insert(self, key, entry)
    }

    fn remove(&mut self, key: &K) -> Option<Entry<V>> {
        HashMap::remove(self, key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn clear(&mut self) {
        HashMap::clear(self)
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a K, &'a Entry<V>)> + 'a> {
        Box::new(HashMap::iter(self))
    }
}

impl<K, V> Storage<K, V> for BTreeMap<K, Entry<V>>
where
    K: Ord,
{
    fn get(&self, key: &K) -> Option<&Entry<V>> {
        BTreeMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut Entry<V>> {
        BTreeMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, entry: Entry<V>) -> Option<Entry<V>> {
        BTreeMap::insert(self, key, entry)
    }

    fn remove(&mut self, key: &K) -> Option<Entry<V>> {
        BTreeMap::remove(self, key)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn clear(&mut self) {
        BTreeMap::clear(self)
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a K, &'a Entry<V>)> + 'a> {
        Box::new(BTreeMap::iter(self))
    }
}
