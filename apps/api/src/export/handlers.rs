//! Axum route handler for PDF export.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::render_pdf;
use crate::layout::layout_document;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    pub file_name: Option<String>,
}

/// POST /api/v1/sessions/:id/export
///
/// Lays out the session's current text and returns the PDF as a named
/// download. The layout pass is synchronous and CPU-bound, so it runs inside
/// `spawn_blocking`; any layout or font error aborts the whole export.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    body: Option<Json<ExportRequest>>,
) -> Result<Response, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    if session.text.trim().is_empty() {
        return Err(AppError::Validation(
            "session has no document text to export".to_string(),
        ));
    }

    let style = state.doc_style.clone();
    let text = session.text;
    let pdf_bytes = tokio::task::spawn_blocking(move || {
        let doc = layout_document(&text, &style).map_err(|e| AppError::Export(e.to_string()))?;
        Ok::<_, AppError>(render_pdf(&doc, &style))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    let file_name = sanitize_file_name(request.file_name.as_deref());
    info!(
        session = %session_id,
        bytes = pdf_bytes.len(),
        file = %file_name,
        "export complete"
    );

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];
    Ok((headers, Bytes::from(pdf_bytes)).into_response())
}

/// Reduces a requested download name to a safe `*.pdf` filename.
fn sanitize_file_name(requested: Option<&str>) -> String {
    let base = requested
        .unwrap_or("resume")
        .trim()
        .trim_end_matches(".pdf");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('-');
    if cleaned.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{cleaned}.pdf")
    }
}
