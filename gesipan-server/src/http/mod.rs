//! HTTP server layer
//!
//! Axum server with:
//! - HTML pages that redirect to `/member/error` on failure
//! - A JSON delete endpoint
//! - Cookie sessions, request tracing and graceful shutdown

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::{ApiError, BoardError};
pub use server::{build_router, run_server, ServerError};
