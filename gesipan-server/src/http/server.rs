//! Axum server setup
//!
//! Router assembly plus the serve loop:
//! - Same-origin CORS by default
//! - Request tracing, timeout and body limit
//! - Graceful shutdown on SIGTERM/Ctrl+C

use axum::extract::{DefaultBodyLimit, Request};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::error::ERROR_PAGE;
use super::routes;
use crate::config::{ConfigError, ServerConfig};
use crate::db::{self, DbError};
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let config = state.config();

    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = [
            format!("http://{}", config.bind_addr),
            format!("http://localhost:{}", config.bind_addr.port()),
        ]
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(timeout_to_error_page))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    Router::new()
        .route("/", get(|| async { Redirect::to("/board/list/1") }))
        .nest("/board", routes::board::router())
        .nest("/member", routes::member::router())
        .merge(routes::health::router())
        .layer(middleware)
        .with_state(state)
}

/// Send timed-out board page requests to the error page.
///
/// The JSON delete route and everything outside `/board` keep the 408.
async fn timeout_to_error_page(request: Request, next: Next) -> Response {
    let is_page =
        request.uri().path().starts_with("/board/") && request.method() != Method::DELETE;
    let response = next.run(request).await;

    if is_page && response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::error!("request timed out");
        return Redirect::to(ERROR_PAGE).into_response();
    }
    response
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// Opens the database, creates missing tables and the upload directory
/// before binding.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    let pool = db::create_pool(&config.database_url).await?;
    db::migrations::run(&pool).await?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tracing::info!(upload_dir = %config.upload_dir.display(), "upload directory ready");

    let bind_addr = config.bind_addr;
    let app = build_router(AppState::new(pool.clone(), config));

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
