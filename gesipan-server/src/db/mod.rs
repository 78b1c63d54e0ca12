//! Database layer - connection pool, migrations and repositories
//!
//! - Connection pool shared through `AppState`, one checkout per query or
//!   transaction
//! - Post + attachments and reply threading are written in transactions
//! - Foreign keys cascade post deletion to replies and attachments

pub mod migrations;
pub mod pool;
pub mod repos;

#[cfg(test)]
pub(crate) mod testing;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use sqlx::SqlitePool;
