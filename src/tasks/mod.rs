//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside a shared cache.
//!
//! # Tasks
//! - Refresh: Reloads every cached entry through the loader at configured intervals

mod refresh;

pub use refresh::spawn_refresh_task;
