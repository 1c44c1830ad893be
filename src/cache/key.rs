//! Cache Key Module
//!
//! Defines the capability every cache key must provide.

use std::fmt::Debug;
use std::hash::Hash;

// == Cache Key ==
/// A type usable as a cache key.
///
/// Keys are hashed and compared for equality by the underlying storage, cloned
/// when handed to listeners or collected for eviction, and rendered with
/// `Debug` in logs and error messages.
///
/// [`is_valid`](CacheKey::is_valid) is the cache's notion of a "null" key:
/// every keyed operation rejects an invalid key with
/// [`CacheError::InvalidArgument`](crate::error::CacheError::InvalidArgument)
/// before touching any state. Most types never produce an invalid key and can
/// rely on the default.
///
/// # Example
///
/// ```
/// use mini_cache::cache::CacheKey;
///
/// #[derive(Debug, Clone, Hash, PartialEq, Eq)]
/// struct UserId(u64);
///
/// impl CacheKey for UserId {
///     fn is_valid(&self) -> bool {
///         self.0 != 0
///     }
/// }
/// ```
pub trait CacheKey: Hash + Eq + Clone + Debug {
    /// Whether this key may be used with the cache.
    fn is_valid(&self) -> bool {
        true
    }
}

macro_rules! impl_always_valid {
    ($($t:ty),* $(,)?) => {
        $(impl CacheKey for $t {})*
    };
}

impl_always_valid!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool);

impl CacheKey for String {
    fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

impl CacheKey for &'static str {
    fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

impl CacheKey for std::path::PathBuf {
    fn is_valid(&self) -> bool {
        !self.as_os_str().is_empty()
    }
}

impl<T: CacheKey> CacheKey for Option<T> {
    fn is_valid(&self) -> bool {
        self.as_ref().is_some_and(CacheKey::is_valid)
    }
}

impl<A: CacheKey, B: CacheKey> CacheKey for (A, B) {
    fn is_valid(&self) -> bool {
        self.0.is_valid() && self.1.is_valid()
    }
}
