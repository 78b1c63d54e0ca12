//! File attachments

use serde::Serialize;
use sqlx::FromRow;

/// Attachment written to the upload directory, not yet recorded in the
/// database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Name the client sent
    pub fname: String,
    /// Unique name inside the upload directory
    pub stored_name: String,
    /// Size in bytes
    pub fsize: i64,
}

/// Attachment row
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoredAttachment {
    pub ano: i64,
    pub bno: i64,
    pub fname: String,
    pub stored_name: String,
    pub fsize: i64,
}
