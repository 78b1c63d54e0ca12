//! Attachment uploads
//!
//! Multipart write-form parsing and storage of uploaded files under the
//! configured upload directory.

use std::path::Path;

use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::Multipart;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::models::Attachment;

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w.-]").unwrap());

/// Upload error
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed multipart body: {0}")]
    Multipart(String),
}

impl From<MultipartError> for UploadError {
    fn from(e: MultipartError) -> Self {
        Self::Multipart(e.body_text())
    }
}

impl From<MultipartRejection> for UploadError {
    fn from(e: MultipartRejection) -> Self {
        Self::Multipart(e.body_text())
    }
}

/// A file part received from the client
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Fields of the write form
#[derive(Debug, Default)]
pub struct WriteForm {
    pub title: Option<String>,
    pub userid: Option<String>,
    pub contents: Option<String>,
    pub files: Vec<UploadedFile>,
}

/// Drain a multipart body into a [`WriteForm`].
///
/// Unknown fields are ignored. File parts without a file name are what
/// browsers send for an unused file input and are skipped.
pub async fn read_write_form(mut multipart: Multipart) -> Result<WriteForm, UploadError> {
    let mut form = WriteForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "title" => form.title = Some(field.text().await?),
            "userid" => form.userid = Some(field.text().await?),
            "contents" => form.contents = Some(field.text().await?),
            "files" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if file_name.is_empty() {
                    continue;
                }
                form.files.push(UploadedFile { file_name, bytes });
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

/// Reduce a client-supplied file name to something safe to put on disk.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned = UNSAFE_CHARS.replace_all(base, "_");
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "file".to_string()
    } else {
        cleaned.into_owned()
    }
}

/// Write every uploaded file into `dir` and describe what was stored.
///
/// On failure, files already written by this call are removed again.
#[tracing::instrument(skip(files), fields(count = files.len()))]
pub async fn process_upload(
    dir: &Path,
    files: &[UploadedFile],
) -> Result<Vec<Attachment>, UploadError> {
    let mut stored = Vec::with_capacity(files.len());

    for file in files.iter().filter(|f| !f.file_name.is_empty()) {
        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_file_name(&file.file_name));

        if let Err(e) = tokio::fs::write(dir.join(&stored_name), &file.bytes).await {
            let names: Vec<String> = stored.iter().map(|a: &Attachment| a.stored_name.clone()).collect();
            remove_stored(dir, &names).await;
            return Err(e.into());
        }

        tracing::debug!(%stored_name, size = file.bytes.len(), "stored upload");
        stored.push(Attachment {
            fname: file.file_name.clone(),
            stored_name,
            fsize: file.bytes.len() as i64,
        });
    }

    Ok(stored)
}

/// Best-effort removal of stored files
pub async fn remove_stored(dir: &Path, stored_names: &[String]) {
    for name in stored_names {
        if let Err(e) = tokio::fs::remove_file(dir.join(name)).await {
            tracing::warn!(stored_name = %name, error = %e, "failed to remove stored file");
        }
    }
}
