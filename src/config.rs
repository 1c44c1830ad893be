//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{Capacity, Policy};
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Limit deciding when the cache is full
    pub limit: Capacity,
    /// Eviction policy applied when the cache is full
    pub policy: Policy,
    /// Background refresh interval in seconds, 0 disables refreshing
    pub refresh_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_LIMIT` - `unlimited`, `size:N` or `weight:N` (default: size:1000)
    /// - `CACHE_POLICY` - `lru`, `lfu` or `weight` (default: lru)
    /// - `REFRESH_INTERVAL` - Refresh frequency in seconds (default: 0, disabled)
    ///
    /// # Errors
    /// Unset variables fall back to defaults; set but malformed ones are
    /// rejected with `InvalidConfig`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            limit: read_var("CACHE_LIMIT")?.unwrap_or(defaults.limit),
            policy: read_var("CACHE_POLICY")?.unwrap_or(defaults.policy),
            refresh_interval: read_var("REFRESH_INTERVAL")?.unwrap_or(defaults.refresh_interval),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limit: Capacity::Size(1000),
            policy: Policy::Lru,
            refresh_interval: 0,
        }
    }
}

/// Parses an environment variable, `None` if unset.
fn read_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| CacheError::InvalidConfig(format!("{}={}", name, raw))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(CacheError::InvalidConfig(format!(
            "{} is not valid unicode",
            name
        ))),
    }
}
