//! Member pages the board redirects to

use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::views;

/// GET /member/error
async fn error_page() -> Html<String> {
    Html(views::member::error())
}

/// GET /member/login
async fn login_page() -> Html<String> {
    Html(views::member::login())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/error", get(error_page))
        .route("/login", get(login_page))
}
