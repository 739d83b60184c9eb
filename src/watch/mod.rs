// src/watch/mod.rs

//! File watching and change routing.
//!
//! This module is responsible for:
//! - Compiling watch/exclude glob patterns per asset category.
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//!
//! It does **not** know about transform tasks or reload broadcasting; it
//! only turns filesystem changes into category-level `Changed` events.

pub mod patterns;
pub mod watcher;

pub use patterns::{build_category_profiles, CategoryWatchProfile};
pub use watcher::{spawn_watcher, WatcherHandle};
