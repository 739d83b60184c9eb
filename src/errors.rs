// src/errors.rs

//! Crate-wide error aliases plus the structured per-item transform error.
//!
//! Most of the crate uses `anyhow` directly; `TransformError` exists so the
//! fail-soft boundary in the style/script tasks can log a structured reason
//! for each skipped source file.

use thiserror::Error;

pub use anyhow::{Error, Result};

/// A failure confined to a single source file (or to one optimization pass)
/// inside a transform task. These are logged and skipped, never propagated.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("compiling {path}: {message}")]
    Compile { path: String, message: String },

    #[error("syntax errors in {path}")]
    Syntax { path: String },

    #[error("reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("optimizing stylesheet: {0}")]
    Optimize(String),
}
