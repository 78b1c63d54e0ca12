//! Login sessions carried in a cookie
//!
//! The cookie holds an opaque token; the `sessions` table maps it to the
//! member id that was logged in. Handlers ask for [`OptionalMember`] when a
//! login only changes who is credited, and [`RequireMember`] when the route
//! cannot be used without one.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::db::SessionRepo;
use crate::http::error::BoardError;
use crate::state::AppState;

/// A logged-in member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub uid: String,
}

/// Find the value of cookie `name` in the request headers.
pub fn extract_session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

async fn resolve_member(parts: &Parts, state: &AppState) -> Option<Member> {
    let token = extract_session_cookie(&parts.headers, &state.config().session_cookie)?;

    match SessionRepo::new(state.pool()).lookup(&token).await {
        Ok(Some(uid)) => Some(Member { uid }),
        Ok(None) => {
            tracing::debug!("session cookie does not match a session");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "session lookup failed, treating as logged out");
            None
        }
    }
}

/// The current member, if a valid session cookie was sent
#[derive(Debug, Clone)]
pub struct OptionalMember(pub Option<Member>);

impl FromRequestParts<AppState> for OptionalMember {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_member(parts, state).await))
    }
}

/// The current member; rejects with [`BoardError::Unauthenticated`] otherwise
#[derive(Debug, Clone)]
pub struct RequireMember(pub Member);

impl FromRequestParts<AppState> for RequireMember {
    type Rejection = BoardError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_member(parts, state)
            .await
            .map(Self)
            .ok_or(BoardError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn finds_named_cookie() {
        let h = headers("theme=dark; gesipan_session=abc-123; lang=ko");
        assert_eq!(
            extract_session_cookie(&h, "gesipan_session").as_deref(),
            Some("abc-123")
        );
    }

    #[test]
    fn ignores_other_and_empty_cookies() {
        assert_eq!(extract_session_cookie(&headers("theme=dark"), "gesipan_session"), None);
        assert_eq!(
            extract_session_cookie(&headers("gesipan_session="), "gesipan_session"),
            None
        );
        assert_eq!(
            extract_session_cookie(&headers("xgesipan_session=abc"), "gesipan_session"),
            None
        );
        assert_eq!(extract_session_cookie(&HeaderMap::new(), "gesipan_session"), None);
    }

    #[test]
    fn reads_every_cookie_header() {
        let mut h = HeaderMap::new();
        h.append(COOKIE, HeaderValue::from_static("a=1"));
        h.append(COOKIE, HeaderValue::from_static("sid=xyz"));
        assert_eq!(extract_session_cookie(&h, "sid").as_deref(), Some("xyz"));
    }
}
