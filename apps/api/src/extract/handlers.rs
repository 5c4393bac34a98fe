//! Axum route handler for file extraction.

use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::{extract_text, ExtractError};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub word_count: usize,
}

/// POST /api/v1/files/extract
///
/// Accepts a multipart body with one `file` field and returns the decoded
/// text. Unsupported types are rejected inline; unreadable files surface as
/// a single extraction error with no partial text.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("uploaded file must have a filename".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        if data.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(
                "file size exceeds the 10MB limit".to_string(),
            ));
        }

        // PDF decoding is CPU-bound; keep it off the async executor.
        let byte_count = data.len();
        let name_for_log = file_name.clone();
        let text = tokio::task::spawn_blocking(move || extract_text(&data, &file_name))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
            })?
            .map_err(|e| match e {
                ExtractError::Unsupported(_) | ExtractError::MissingExtension => {
                    AppError::Validation(e.to_string())
                }
                ExtractError::Unreadable { .. } => AppError::Extract(e.to_string()),
            })?;

        let word_count = text.split_whitespace().count();
        info!(
            file = %name_for_log,
            bytes = byte_count,
            words = word_count,
            "upload extracted"
        );
        return Ok(Json(ExtractResponse { text, word_count }));
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}
