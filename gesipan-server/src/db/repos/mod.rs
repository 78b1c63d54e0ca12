//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - Multi-step writes run in one transaction
//! - Missing rows surface as `DbError::NotFound`

pub mod boards;
pub mod files;
pub mod sessions;

pub use boards::{BoardRepo, DeleteOutcome};
pub use files::FileRepo;
pub use sessions::SessionRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
