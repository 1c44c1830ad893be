//! Cache Limit Module
//!
//! Decides when the cache as a whole is full and must evict before inserting.

use std::fmt;
use std::str::FromStr;

use crate::cache::Statistics;
use crate::error::CacheError;

// == Limit ==
/// Predicate deciding whether the cache is full.
///
/// Evaluated before a new entry is inserted and again after every eviction,
/// with the current entry count and statistics. Any
/// `Fn(usize, &Statistics) -> bool` closure is a limit.
pub trait Limit: Send + Sync {
    /// Whether a cache holding `len` entries with these statistics is full.
    fn is_full(&self, len: usize, statistics: &Statistics) -> bool;
}

impl<F> Limit for F
where
    F: Fn(usize, &Statistics) -> bool + Send + Sync,
{
    fn is_full(&self, len: usize, statistics: &Statistics) -> bool {
        self(len, statistics)
    }
}

// == Capacity ==
/// Built-in limits.
///
/// Parses from `unlimited`, `size:N` or `weight:N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capacity {
    /// Never full.
    #[default]
    Unlimited,
    /// Full once the cache holds this many entries.
    Size(usize),
    /// Full once the total weight reaches this value.
    Weight(u64),
}

impl Limit for Capacity {
    fn is_full(&self, len: usize, statistics: &Statistics) -> bool {
        match *self {
            Capacity::Unlimited => false,
            Capacity::Size(max) => len >= max,
            Capacity::Weight(max) => statistics.weight() >= max,
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Unlimited => write!(f, "unlimited"),
            Capacity::Size(max) => write!(f, "size:{}", max),
            Capacity::Weight(max) => write!(f, "weight:{}", max),
        }
    }
}

impl FromStr for Capacity {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unlimited") {
            return Ok(Capacity::Unlimited);
        }

        let invalid = || CacheError::InvalidConfig(format!("unrecognised cache limit '{}'", s));
        let (kind, max) = s.split_once(':').ok_or_else(invalid)?;
        match kind.trim().to_ascii_lowercase().as_str() {
            "size" => max.trim().parse().map(Capacity::Size).map_err(|_| invalid()),
            "weight" => max.trim().parse().map(Capacity::Weight).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}
