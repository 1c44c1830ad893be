//! Loader and Weigher Module
//!
//! The two value-side capabilities a cache consumes: loading values for
//! missing keys and weighing values on insertion.

// == Loader ==
/// Supplies values for keys that are not in the cache.
///
/// `Ok(None)` means the key is unknown. Both `Ok(None)` and `Err` are treated
/// as a failed load: the cache counts an error and creates no entry. The
/// loader must not touch the cache it is loading for.
///
/// Any `Fn(&K) -> anyhow::Result<Option<V>>` closure is a loader.
pub trait Loader<K, V>: Send + Sync {
    /// Loads the value for `key`.
    fn load(&self, key: &K) -> anyhow::Result<Option<V>>;
}

impl<K, V, F> Loader<K, V> for F
where
    F: Fn(&K) -> anyhow::Result<Option<V>> + Send + Sync,
{
    fn load(&self, key: &K) -> anyhow::Result<Option<V>> {
        self(key)
    }
}

/// Loader that never finds anything. This is the default loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFound;

impl<K, V> Loader<K, V> for NotFound {
    fn load(&self, _key: &K) -> anyhow::Result<Option<V>> {
        Ok(None)
    }
}

// == Weigher ==
/// Computes the cost of a value for weight-based limits.
///
/// Called exactly once per insertion; the result is fixed for the lifetime of
/// the entry. Any `Fn(&V) -> u64` closure is a weigher.
pub trait Weigher<V>: Send + Sync {
    fn weigh(&self, value: &V) -> u64;
}

impl<V, F> Weigher<V> for F
where
    F: Fn(&V) -> u64 + Send + Sync,
{
    fn weigh(&self, value: &V) -> u64 {
        self(value)
    }
}

/// Weigher assigning zero to every value. This is the default weigher.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroWeigher;

impl<V> Weigher<V> for ZeroWeigher {
    #[inline]
    fn weigh(&self, _value: &V) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_loader() {
        let loader = NotFound;
        let loaded: Option<String> = Loader::<i32, String>::load(&loader, &1).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_closure_loader() {
        let loader = |key: &i32| -> anyhow::Result<Option<String>> { Ok(Some(key.to_string())) };
        assert_eq!(loader.load(&7).unwrap(), Some("7".to_string()));
    }

    #[test]
    fn test_failing_closure_loader() {
        let loader = |_: &i32| -> anyhow::Result<Option<String>> { anyhow::bail!("offline") };
        assert!(loader.load(&1).is_err());
    }

    #[test]
    fn test_weighers() {
        assert_eq!(Weigher::<String>::weigh(&ZeroWeigher, &"abc".to_string()), 0);

        let by_len = |value: &String| value.len() as u64;
        assert_eq!(by_len.weigh(&"abc".to_string()), 3);
    }
}
