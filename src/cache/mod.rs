//! Cache Module
//!
//! Provides a bounded in-memory cache with pluggable loading, weighing and
//! score-based eviction.

mod builder;
mod entry;
mod key;
mod limit;
mod listener;
mod loader;
mod policy;
mod stats;
mod storage;
mod store;


// Re-export public types
pub use builder::CacheBuilder;
pub use entry::Entry;
pub use key::CacheKey;
pub use limit::{Capacity, Limit};
pub use listener::{Event, Listener};
pub use loader::{Loader, NotFound, Weigher, ZeroWeigher};
pub use policy::{EvictionPolicy, Policy};
pub use stats::Statistics;
pub use storage::Storage;
pub use store::Cache;
