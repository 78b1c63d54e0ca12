//! Replies and nested replies
//!
//! A root reply answers the post directly and has `rpno == rno`. A nested
//! reply answers a root reply and stores that root's `rno` in `rpno`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::board::validate_userid;
use super::validation::{bounded_text, positive_id};
use super::ValidationError;

/// Maximum length for reply text
const MAX_REPLY_LEN: usize = 2_000;

/// Reply payload as submitted (JSON body or form)
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyForm {
    pub bno: i64,
    #[serde(default)]
    pub userid: String,
    pub reply: String,
    #[serde(default)]
    pub rpno: Option<i64>,
}

/// Validated reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReply {
    bno: i64,
    userid: String,
    reply: String,
    rpno: Option<i64>,
}

impl NewReply {
    pub fn new(
        bno: i64,
        userid: &str,
        reply: &str,
        rpno: Option<i64>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            bno: positive_id("bno", bno)?,
            userid: validate_userid(userid)?,
            reply: bounded_text("reply", reply, MAX_REPLY_LEN)?,
            rpno: rpno.map(|n| positive_id("rpno", n)).transpose()?,
        })
    }

    /// Validate a submitted form, using `author` in place of the submitted
    /// userid when the request carries a session.
    pub fn from_form(form: &ReplyForm, author: Option<&str>) -> Result<Self, ValidationError> {
        let userid = author.unwrap_or(&form.userid);
        Self::new(form.bno, userid, &form.reply, form.rpno)
    }

    pub fn bno(&self) -> i64 {
        self.bno
    }

    pub fn userid(&self) -> &str {
        &self.userid
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    /// Root reply being answered; required for nested replies.
    pub fn parent(&self) -> Result<i64, ValidationError> {
        self.rpno.ok_or(ValidationError::Empty { field: "rpno" })
    }
}

/// Stored reply
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reply {
    pub rno: i64,
    pub reply: String,
    pub userid: String,
    pub regdate: DateTime<Utc>,
    pub bno: i64,
    pub rpno: i64,
}

impl Reply {
    pub fn is_root(&self) -> bool {
        self.rno == self.rpno
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(userid: &str, rpno: Option<i64>) -> ReplyForm {
        ReplyForm {
            bno: 42,
            userid: userid.to_string(),
            reply: "nice post".to_string(),
            rpno,
        }
    }

    #[test]
    fn session_author_overrides_submitted_userid() {
        let reply = NewReply::from_form(&form("mallory", None), Some("alice")).unwrap();
        assert_eq!(reply.userid(), "alice");
        assert_eq!(reply.bno(), 42);
    }

    #[test]
    fn anonymous_form_needs_userid() {
        assert_eq!(
            NewReply::from_form(&form("", None), None).unwrap_err(),
            ValidationError::Empty { field: "userid" }
        );
    }

    #[test]
    fn nested_reply_requires_parent() {
        let root = NewReply::from_form(&form("bob", None), None).unwrap();
        assert!(root.parent().is_err());

        let nested = NewReply::from_form(&form("bob", Some(3)), None).unwrap();
        assert_eq!(nested.parent().unwrap(), 3);
    }

    #[test]
    fn rejects_non_positive_ids() {
        assert!(NewReply::new(0, "bob", "hi", None).is_err());
        assert!(NewReply::new(1, "bob", "hi", Some(-1)).is_err());
    }

    #[test]
    fn deserializes_json_payload() {
        let form: ReplyForm =
            serde_json::from_str(r#"{"bno": 42, "userid": "bob", "reply": "hi"}"#).unwrap();
        assert_eq!(form.bno, 42);
        assert_eq!(form.rpno, None);
    }
}
