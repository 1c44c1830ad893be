//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with access bookkeeping.

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A single cached value and the bookkeeping eviction policies score.
///
/// Entries are created and destroyed only by the cache; callers get shared
/// references through [`Cache::entry`](crate::cache::Cache::entry).
#[derive(Debug, Clone)]
pub struct Entry<V> {
    value: V,
    weight: u64,
    access_count: u64,
    created: DateTime<Utc>,
    last_accessed: DateTime<Utc>,
    /// Logical clock reading of the last insertion or hit
    tick: u64,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates a fresh entry that has never been accessed.
    pub(crate) fn new(value: V, weight: u64, tick: u64) -> Self {
        let now = Utc::now();
        Self {
            value,
            weight,
            access_count: 0,
            created: now,
            last_accessed: now,
            tick,
        }
    }

    // == Touch ==
    /// Records a cache hit on this entry.
    pub(crate) fn touch(&mut self, tick: u64) {
        self.last_accessed = Utc::now();
        self.access_count += 1;
        self.tick = tick;
    }

    /// The cached value.
    pub fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn into_value(self) -> V {
        self.value
    }

    /// Weight assigned by the weigher when this entry was inserted.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Number of cache hits on this entry.
    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    /// Time the entry was inserted.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Time of the most recent hit, or the creation time if never hit.
    pub fn last_accessed(&self) -> DateTime<Utc> {
        self.last_accessed
    }

    /// Position of the last insertion or hit in the owning cache's logical clock.
    ///
    /// Unique per cache; used to break ties between equal eviction scores.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = Entry::new("value".to_string(), 5, 1);

        assert_eq!(entry.value(), "value");
        assert_eq!(entry.weight(), 5);
        assert_eq!(entry.access_count(), 0);
        assert_eq!(entry.created(), entry.last_accessed());
        assert_eq!(entry.tick(), 1);
    }

    #[test]
    fn test_touch_updates_bookkeeping() {
        let mut entry = Entry::new("value", 0, 1);
        let created = entry.created();

        entry.touch(2);
        entry.touch(7);

        assert_eq!(entry.access_count(), 2);
        assert_eq!(entry.tick(), 7);
        assert!(entry.last_accessed() >= created);
        assert_eq!(entry.created(), created, "Creation time never changes");
    }

    #[test]
    fn test_touch_does_not_change_weight() {
        let mut entry = Entry::new(42u32, 9, 1);
        entry.touch(2);
        assert_eq!(entry.weight(), 9);
        assert_eq!(entry.into_value(), 42);
    }
}
