//! Listener Module
//!
//! Structural change notification: entries added to and evicted from a cache.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{CacheError, Result};

// == Event ==
/// Kind of structural change a listener is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Event {
    /// A new entry was inserted (by `add`, a load, or a prefetch).
    Added,
    /// An entry was evicted to satisfy the cache limit.
    Evicted,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Added => f.write_str("added"),
            Event::Evicted => f.write_str("evicted"),
        }
    }
}

// == Listener ==
/// Receives cache change events synchronously, on the thread performing the
/// cache operation.
///
/// Returning an error aborts the cache operation that triggered the event; the
/// error reaches its caller as [`CacheError::Listener`]. Any
/// `Fn(Event, &K) -> anyhow::Result<()>` closure is a listener.
pub trait Listener<K>: Send + Sync {
    fn on_event(&self, event: Event, key: &K) -> anyhow::Result<()>;
}

impl<K, F> Listener<K> for F
where
    F: Fn(Event, &K) -> anyhow::Result<()> + Send + Sync,
{
    fn on_event(&self, event: Event, key: &K) -> anyhow::Result<()> {
        self(event, key)
    }
}

// == Listeners ==
/// Registered listeners, notified in registration order.
pub(crate) struct Listeners<K> {
    listeners: Vec<Arc<dyn Listener<K>>>,
}

impl<K> Listeners<K> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, listener: Arc<dyn Listener<K>>) {
        self.listeners.push(listener);
    }

    // == Remove ==
    /// Unregisters the first listener that is the same allocation as `listener`.
    ///
    /// Returns false if it was never registered.
    pub(crate) fn remove(&mut self, listener: &Arc<dyn Listener<K>>) -> bool {
        match self
            .listeners
            .iter()
            .position(|registered| Arc::ptr_eq(registered, listener))
        {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    // == Broadcast ==
    /// Notifies every listener, stopping at the first failure.
    pub(crate) fn broadcast(&self, event: Event, key: &K) -> Result<()> {
        for listener in &self.listeners {
            listener.on_event(event, key).map_err(CacheError::Listener)?;
        }
        Ok(())
    }
}

impl<K> fmt::Debug for Listeners<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
