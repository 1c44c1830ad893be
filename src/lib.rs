//! Mini Cache - A bounded in-memory cache
//!
//! Provides a lookup-or-load cache with pluggable loaders, weighers, limits and
//! eviction policies, lifetime statistics and change listeners.

pub mod cache;
pub mod config;
pub mod error;
pub mod shared;
pub mod tasks;

pub use cache::{Cache, CacheBuilder, Capacity, Event, Policy, Statistics};
pub use config::Config;
pub use error::{CacheError, Result};
pub use shared::SharedCache;
pub use tasks::spawn_refresh_task;
