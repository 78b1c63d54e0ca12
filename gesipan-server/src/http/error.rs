//! Error boundaries with IntoResponse
//!
//! Page routes fail with [`BoardError`], which always becomes a redirect to
//! an error page. The delete route answers JSON and fails with [`ApiError`].

use axum::extract::multipart::MultipartRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;
use crate::uploads::UploadError;

pub const ERROR_PAGE: &str = "/member/error";
pub const LOGIN_PAGE: &str = "/member/login";

pub const DELETE_OK_MESSAGE: &str = "게시물이 성공적으로 삭제되었습니다.";
pub const DELETE_MISSING_MESSAGE: &str = "게시물이 존재하지 않거나 이미 삭제되었습니다.";
pub const DELETE_FAILED_PREFIX: &str = "삭제 중 오류가 발생했습니다: ";
pub const LOGIN_REQUIRED_MESSAGE: &str = "로그인이 필요합니다.";

/// Failure of a page route
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error: {0}")]
    Storage(DbError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("login required")]
    Unauthenticated,
}

impl From<DbError> for BoardError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            other => Self::Storage(other),
        }
    }
}

impl From<MultipartRejection> for BoardError {
    fn from(e: MultipartRejection) -> Self {
        Self::Upload(e.into())
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        match &self {
            Self::Unauthenticated => {
                tracing::info!("login required, redirecting");
                return Redirect::to(LOGIN_PAGE).into_response();
            }
            Self::NotFound { .. } | Self::Validation(_) => {
                tracing::warn!(error = %self, "request rejected");
            }
            Self::Storage(_) | Self::Upload(_) => {
                tracing::error!(error = %self, "request failed");
            }
        }

        Redirect::to(ERROR_PAGE).into_response()
    }
}

/// Failure of a JSON route
#[derive(Debug)]
pub enum ApiError {
    /// Nothing to act on (404)
    NotFound,

    /// Storage failed while deleting (500, logged)
    DeleteFailed(DbError),

    /// Session required (401)
    Unauthenticated,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Self::NotFound => (StatusCode::NOT_FOUND, DELETE_MISSING_MESSAGE.to_string()),
            Self::DeleteFailed(e) => {
                tracing::error!(error = %e, "delete failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{DELETE_FAILED_PREFIX}{e}"),
                )
            }
            Self::Unauthenticated => (StatusCode::UNAUTHORIZED, LOGIN_REQUIRED_MESSAGE.to_string()),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => Self::NotFound,
            other => Self::DeleteFailed(other),
        }
    }
}
