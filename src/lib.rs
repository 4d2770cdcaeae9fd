//! # Student Portal - SQLite-backed student records
//!
//! A small record store for `(id, name, age)` tuples with an interactive
//! menu and one-shot subcommands on top.
//!
//! Student Portal provides:
//! - A `StudentStore` owning one long-lived, lock-serialized SQLite connection
//! - Parameterized save / list / search / delete operations
//! - An interactive shell driven over any reader/writer pair
//! - Human and JSON output modes for scripting

pub mod student;
pub mod storage;
pub mod config;
pub mod output;
pub mod ui;
pub mod shell;
pub mod commands;

// Re-exports for convenient access
pub use student::{NewStudent, RecordId, StudentRecord, MAX_AGE};
pub use storage::StudentStore;
pub use output::OutputMode;

use std::path::PathBuf;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error types for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store is not initialized")]
    NotInitialized,

    #[error("Cannot open database {}: {source}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Cannot create schema: {0}")]
    SchemaFailed(#[source] rusqlite::Error),

    #[error("Write failed: {0}")]
    WriteFailed(#[source] rusqlite::Error),

    #[error("Read failed: {0}")]
    ReadFailed(#[source] rusqlite::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
