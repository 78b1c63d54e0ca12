//! Custom Axum extractors
//!
//! Every rejection is a [`BoardError`], so a bad path or payload on a page
//! route ends on the error page like any other failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use super::error::BoardError;
use crate::models::{Pagination, SearchFilter, ValidationError};

/// Look up one named path parameter.
async fn path_param<S>(
    parts: &mut Parts,
    state: &S,
    name: &'static str,
) -> Result<String, ValidationError>
where
    S: Send + Sync,
{
    let Path(params): Path<Vec<(String, String)>> = Path::from_request_parts(parts, state)
        .await
        .map_err(|_| ValidationError::Empty { field: name })?;

    params
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
        .ok_or(ValidationError::Empty { field: name })
}

/// Extract and validate the page number `{cpg}`
pub struct ValidPage(pub Pagination);

impl<S> FromRequestParts<S> for ValidPage
where
    S: Send + Sync,
{
    type Rejection = BoardError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = path_param(parts, state, "cpg").await?;
        Ok(Self(Pagination::parse(&raw)?))
    }
}

/// Extract and validate the search filter `{ftype}/{fkey}`
pub struct ValidFilter(pub SearchFilter);

impl<S> FromRequestParts<S> for ValidFilter
where
    S: Send + Sync,
{
    type Rejection = BoardError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ftype = path_param(parts, state, "ftype").await?;
        let fkey = path_param(parts, state, "fkey").await?;
        Ok(Self(SearchFilter::new(&ftype, &fkey)?))
    }
}

/// Extract a post number `{bno}`
pub struct ValidBno(pub i64);

impl<S> FromRequestParts<S> for ValidBno
where
    S: Send + Sync,
{
    type Rejection = BoardError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = path_param(parts, state, "bno").await?;
        parse_bno(&raw).map(Self).map_err(BoardError::from)
    }
}

/// Parse a positive post number.
pub fn parse_bno(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or(ValidationError::InvalidFormat {
            field: "bno",
            reason: "must be a positive integer",
        })
}

/// Body deserialized from JSON or a URL-encoded form, by content type
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = BoardError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.trim_start().starts_with("application/json"));

        let payload = if is_json {
            Json::<T>::from_request(req, state).await.map(|Json(v)| v).map_err(|e| {
                tracing::debug!(error = %e, "rejected JSON payload");
            })
        } else {
            Form::<T>::from_request(req, state).await.map(|Form(v)| v).map_err(|e| {
                tracing::debug!(error = %e, "rejected form payload");
            })
        };

        payload.map(Self).map_err(|()| {
            BoardError::Validation(ValidationError::InvalidFormat {
                field: "payload",
                reason: "malformed JSON or form body",
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bno_accepts_positive_numbers() {
        assert_eq!(parse_bno("42").unwrap(), 42);
        assert!(parse_bno("0").is_err());
        assert!(parse_bno("-3").is_err());
        assert!(parse_bno("abc").is_err());
    }
}
