//! Storage Layer - SQLite-backed document store
//!
//! System of record is SQLite with one table:
//! - documents(path, body, updated_at)
//!
//! Bodies are JSON objects. The store offers point reads, whole-document
//! writes, field overwrites, array union, keyed element replace/remove and
//! an atomic per-field read-modify-write.

pub mod schema;
pub mod sqlite;

pub use sqlite::{DocStats, SqliteStore};
