// src/engine/mod.rs

//! Orchestration engine for watch mode.
//!
//! This module ties together:
//! - the per-category idle/running/pending state machine
//! - the executor loop that runs transform tasks in-process
//! - the main runtime event loop that reacts to:
//!   - file-watch triggers
//!   - task completion events
//!   - shutdown signals

pub mod executor;
pub mod runtime;
pub mod state;

pub use executor::{spawn_executor, BuildJob};
pub use runtime::{Runtime, RuntimeEvent, TaskOutcome};
pub use state::{CategoryState, CategoryStates};
