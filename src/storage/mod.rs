//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with one table:
//! - Students(Id, Name, Age)

pub mod schema;
pub mod sqlite;

pub use sqlite::StudentStore;
