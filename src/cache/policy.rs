//! Eviction Policy Module
//!
//! Scores entries for eviction. When the cache is full, entries are evicted in
//! ascending score order.

use std::fmt;
use std::str::FromStr;

use crate::cache::Entry;
use crate::error::CacheError;

// == Eviction Policy ==
/// Scores a cache entry; the lowest score is evicted first.
///
/// Equal scores are broken by [`Entry::tick`], so the entry touched least
/// recently goes first. Any `Fn(&Entry<V>) -> u64` closure is a policy.
pub trait EvictionPolicy<V>: Send + Sync {
    fn score(&self, entry: &Entry<V>) -> u64;
}

impl<V, F> EvictionPolicy<V> for F
where
    F: Fn(&Entry<V>) -> u64 + Send + Sync,
{
    fn score(&self, entry: &Entry<V>) -> u64 {
        self(entry)
    }
}

// == Policy ==
/// Built-in eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Least recently used: oldest `last_accessed` first.
    #[default]
    Lru,
    /// Least frequently used: fewest hits first.
    Lfu,
    /// Lightest entry first.
    Weight,
}

impl<V> EvictionPolicy<V> for Policy {
    fn score(&self, entry: &Entry<V>) -> u64 {
        match self {
            Policy::Lru => entry
                .last_accessed()
                .timestamp_nanos_opt()
                .map_or(u64::MAX, |nanos| nanos.max(0) as u64),
            Policy::Lfu => entry.access_count(),
            Policy::Weight => entry.weight(),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Lru => "lru",
            Policy::Lfu => "lfu",
            Policy::Weight => "weight",
        };
        f.write_str(name)
    }
}

impl FromStr for Policy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(Policy::Lru),
            "lfu" => Ok(Policy::Lfu),
            "weight" => Ok(Policy::Weight),
            other => Err(CacheError::InvalidConfig(format!(
                "unrecognised eviction policy '{}'",
                other
            ))),
        }
    }
}
