//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Loader failures never appear here: they are absorbed by the cache and
/// surface only through [`Statistics::errors`](crate::cache::Statistics::errors).
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key rejected by [`CacheKey::is_valid`](crate::cache::CacheKey::is_valid)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A registered listener failed while being notified
    #[error("Listener failed: {0}")]
    Listener(#[source] anyhow::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CacheError::InvalidArgument("empty key".to_string());
        assert_eq!(err.to_string(), "Invalid argument: empty key");

        let err = CacheError::InvalidConfig("CACHE_POLICY=fifo".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: CACHE_POLICY=fifo");
    }

    #[test]
    fn test_listener_error_keeps_source() {
        let err = CacheError::Listener(anyhow::anyhow!("disk full"));
        assert_eq!(err.to_string(), "Listener failed: disk full");
        assert!(std::error::Error::source(&err).is_some());
    }
}
