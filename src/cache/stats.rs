//! Cache Statistics Module
//!
//! Tracks cache behaviour over its lifetime: hits, misses, loader errors,
//! evictions, loading time, peak size and current weight.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

// == Statistics ==
/// Cumulative cache statistics.
///
/// Read-only outside the crate. Every counter except `weight` only ever grows;
/// `weight` always equals the sum of the live entries' weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    hits: u64,
    misses: u64,
    errors: u64,
    eviction_count: u64,
    loading_time: Duration,
    max_size: usize,
    weight: u64,
}

impl Statistics {
    // == Constructor ==
    /// Creates a new Statistics with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lookups served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that had to consult the loader.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of loads that produced no value.
    pub fn errors(&self) -> u64 {
        self.errors
    }

    /// Number of entries evicted to respect the cache limit.
    pub fn eviction_count(&self) -> u64 {
        self.eviction_count
    }

    /// Total time spent inside the loader, failed loads included.
    pub fn loading_time(&self) -> Duration {
        self.loading_time
    }

    /// Largest number of entries ever held at once.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Sum of the weights of all live entries, saturating at `u64::MAX`.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_error(&mut self) {
        self.errors += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.eviction_count += 1;
    }

    pub(crate) fn record_loading_time(&mut self, elapsed: Duration) {
        self.loading_time += elapsed;
    }

    // == Track Size ==
    /// Raises the high-water mark if `size` exceeds it.
    pub(crate) fn track_size(&mut self, size: usize) {
        self.max_size = self.max_size.max(size);
    }

    pub(crate) fn add_weight(&mut self, weight: u64) {
        self.weight = self.weight.saturating_add(weight);
    }

    pub(crate) fn subtract_weight(&mut self, weight: u64) {
        self.weight = self.weight.saturating_sub(weight);
    }

    pub(crate) fn reset_weight(&mut self) {
        self.weight = 0;
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} errors={} evictions={} loading_time={:?} max_size={} weight={}",
            self.hits,
            self.misses,
            self.errors,
            self.eviction_count,
            self.loading_time,
            self.max_size,
            self.weight
        )
    }
}
