//! # Folio - Personal portfolio site
//!
//! A public portfolio page plus a gated admin dashboard, both backed by one
//! JSON document kept in a small document store.
//!
//! Folio provides:
//! - A typed model of the portfolio document (hero, experiences, projects, skills)
//! - A SQLite-backed document store with field and array primitives
//! - A data access layer performing list-item add/update/remove
//! - Server-side HTML rendering of the public sections
//! - Dashboard editor state machines and the HTTP surface driving them

pub mod model;
pub mod id;
pub mod storage;
pub mod repository;
pub mod render;
pub mod dashboard;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use model::{
    Experience, ExperienceDraft, HeroData, ListItem, ListName, PortfolioRecord, Project,
    ProjectDraft, Skill, SkillDraft,
};
pub use repository::Portfolio;
pub use storage::SqliteStore;

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Folio operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Document already exists: {0}")]
    DocumentExists(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Unknown list: {0}")]
    UnknownList(String),
}
