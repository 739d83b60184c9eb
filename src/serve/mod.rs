// src/serve/mod.rs

//! Development server over the output directory, plus the reload-broadcast
//! channel. The only operation the rest of the system depends on is
//! [`ReloadHub::broadcast`].

pub mod reload;
pub mod server;

pub use reload::{ReloadHub, ReloadMessage};
pub use server::{serve, ServerConfig};
