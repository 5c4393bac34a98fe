//! Axum route handlers for the Optimization API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::optimize::{OptimizeInput, Seniority};
use crate::session::EditorSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub target_title: String,
    #[serde(default)]
    pub seniority: Seniority,
    pub job_description: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub session: EditorSession,
    pub key_changes: Vec<String>,
    pub suggested_skills: Vec<String>,
    pub ats_score: u8,
}

/// POST /api/v1/sessions/:id/optimize
///
/// Runs the AI rewrite over the session's current text. The session is only
/// updated after a fully valid response — any failure (transport, API,
/// malformed shape) leaves the stored text untouched.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    if request.target_title.trim().is_empty() {
        return Err(AppError::Validation(
            "target_title cannot be empty".to_string(),
        ));
    }

    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    if session.text.trim().is_empty() {
        return Err(AppError::Validation(
            "session has no resume text to optimize".to_string(),
        ));
    }

    let input = OptimizeInput {
        resume_text: session.text,
        target_title: request.target_title,
        seniority: request.seniority,
        job_description: request.job_description,
        notes: request.notes,
    };
    let optimized = state.optimizer.optimize(&input).await?;

    let session = state
        .sessions
        .set_text(session_id, optimized.optimized_text.clone())
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    info!(
        session = %session_id,
        ats_score = optimized.ats_score,
        changes = optimized.key_changes.len(),
        "optimization applied"
    );

    Ok(Json(OptimizeResponse {
        session,
        key_changes: optimized.key_changes,
        suggested_skills: optimized.suggested_skills,
        ats_score: optimized.ats_score,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::layout::default_doc_style;
    use crate::optimize::{OptimizeBackend, OptimizedResume};
    use crate::session::SessionStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedBackend(OptimizedResume);

    #[async_trait]
    impl OptimizeBackend for FixedBackend {
        async fn optimize(&self, _input: &OptimizeInput) -> Result<OptimizedResume, AppError> {
            Ok(self.0.clone())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl OptimizeBackend for FailingBackend {
        async fn optimize(&self, _input: &OptimizeInput) -> Result<OptimizedResume, AppError> {
            Err(AppError::Llm("service unavailable".to_string()))
        }
    }

    fn test_state(backend: Arc<dyn OptimizeBackend>) -> AppState {
        AppState {
            optimizer: backend,
            sessions: SessionStore::default(),
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
            doc_style: default_doc_style(),
        }
    }

    fn make_request() -> OptimizeRequest {
        OptimizeRequest {
            target_title: "Platform Engineer".to_string(),
            seniority: Seniority::Senior,
            job_description: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_successful_optimization_replaces_session_text() {
        let rewritten = OptimizedResume {
            optimized_text: "# Jane Doe\n## Experience\n- Led platform work".to_string(),
            key_changes: vec!["Led with platform experience".to_string()],
            suggested_skills: vec!["Kubernetes".to_string()],
            ats_score: 84,
        };
        let state = test_state(Arc::new(FixedBackend(rewritten.clone())));
        let session = state.sessions.create(Some("# Jane Doe\nold".to_string())).await;

        let Json(response) = handle_optimize(
            State(state.clone()),
            Path(session.id),
            Json(make_request()),
        )
        .await
        .expect("optimization should succeed");

        assert_eq!(response.ats_score, 84);
        assert_eq!(response.session.text, rewritten.optimized_text);
        let stored = state.sessions.get(session.id).await.unwrap();
        assert_eq!(stored.text, rewritten.optimized_text);
    }

    #[tokio::test]
    async fn test_failed_optimization_preserves_session_text() {
        let state = test_state(Arc::new(FailingBackend));
        let original = "# Jane Doe\noriginal content";
        let session = state.sessions.create(Some(original.to_string())).await;

        let result = handle_optimize(
            State(state.clone()),
            Path(session.id),
            Json(make_request()),
        )
        .await;

        assert!(matches!(result, Err(AppError::Llm(_))));
        let stored = state.sessions.get(session.id).await.unwrap();
        assert_eq!(stored.text, original, "failed optimization must not touch text");
    }

    #[tokio::test]
    async fn test_empty_target_title_is_validation_error() {
        let state = test_state(Arc::new(FailingBackend));
        let session = state.sessions.create(Some("text".to_string())).await;
        let mut request = make_request();
        request.target_title = "  ".to_string();

        let result = handle_optimize(State(state), Path(session.id), Json(request)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_empty_session_text_is_validation_error() {
        let state = test_state(Arc::new(FailingBackend));
        let session = state.sessions.create(None).await;

        let result = handle_optimize(State(state), Path(session.id), Json(make_request())).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let state = test_state(Arc::new(FailingBackend));
        let result = handle_optimize(State(state), Path(Uuid::new_v4()), Json(make_request())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
