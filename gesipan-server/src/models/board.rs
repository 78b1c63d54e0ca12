//! Board posts
//!
//! `NewBoard` is the validated payload for creating a post; the other types
//! are read back from storage.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sqlx::FromRow;

use super::validation::bounded_text;
use super::{Reply, StoredAttachment, ValidationError};

/// Maximum length for post titles
const MAX_TITLE_LEN: usize = 100;

/// Maximum length for post contents
const MAX_CONTENTS_LEN: usize = 20_000;

/// Maximum length for member ids
const MAX_USERID_LEN: usize = 18;

/// Member ids: letters, digits, underscore, dot, hyphen
static USERID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("invalid userid regex"));

/// Validate a member id.
///
/// # Example
/// ```
/// use gesipan_server::models::validate_userid;
///
/// assert!(validate_userid("abc123").is_ok());
/// assert!(validate_userid("").is_err());
/// assert!(validate_userid("no spaces").is_err());
/// ```
pub fn validate_userid(s: &str) -> Result<String, ValidationError> {
    let userid = bounded_text("userid", s, MAX_USERID_LEN)?;

    if !USERID_RE.is_match(&userid) {
        return Err(ValidationError::InvalidFormat {
            field: "userid",
            reason: "may only contain letters, digits, '_', '.' and '-'",
        });
    }

    Ok(userid)
}

/// Validated post creation payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoard {
    title: String,
    userid: String,
    contents: String,
}

impl NewBoard {
    pub fn new(title: &str, userid: &str, contents: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            title: bounded_text("title", title, MAX_TITLE_LEN)?,
            userid: validate_userid(userid)?,
            contents: bounded_text("contents", contents, MAX_CONTENTS_LEN)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn userid(&self) -> &str {
        &self.userid
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

/// Post as shown in the list (no contents)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BoardSummary {
    pub bno: i64,
    pub title: String,
    pub userid: String,
    pub regdate: DateTime<Utc>,
    pub views: i64,
}

/// Full post record
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Board {
    pub bno: i64,
    pub title: String,
    pub userid: String,
    pub contents: String,
    pub regdate: DateTime<Utc>,
    pub views: i64,
}

/// Post with everything the view page shows
#[derive(Debug, Clone, Serialize)]
pub struct BoardDetail {
    pub board: Board,
    pub attachs: Vec<StoredAttachment>,
    /// Ordered by `(rpno, rno)`: each root reply is followed by its answers
    pub replies: Vec<Reply>,
}
