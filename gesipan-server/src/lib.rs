//! gesipan-server: bulletin board over HTTP
//!
//! Paginated post list and search, posts with file attachments, replies
//! with one level of nesting, and deletion. Pages are rendered on the
//! server; storage is SQLite.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod session;
pub mod state;
pub mod uploads;
pub mod views;

pub use config::{ConfigError, FileConfig, ServerConfig};
pub use http::{build_router, run_server, ServerError};
pub use state::AppState;
