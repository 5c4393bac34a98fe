//! Axum route handlers for editor sessions.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::{EditorMode, EditorSession};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetTextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: EditorMode,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<Json<EditorSession>, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let session = state.sessions.create(request.text).await;
    info!(session = %session.id, "editor session created");
    Ok(Json(session))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<EditorSession>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
    Ok(Json(session))
}

/// PUT /api/v1/sessions/:id/text
pub async fn handle_set_text(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SetTextRequest>,
) -> Result<Json<EditorSession>, AppError> {
    let session = state
        .sessions
        .set_text(session_id, request.text)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
    Ok(Json(session))
}

/// PUT /api/v1/sessions/:id/mode
pub async fn handle_set_mode(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SetModeRequest>,
) -> Result<Json<EditorSession>, AppError> {
    let session = state
        .sessions
        .set_mode(session_id, request.mode)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
    Ok(Json(session))
}
