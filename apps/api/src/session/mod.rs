//! Editor/preview session state — transient and in-memory only.
//!
//! One document text backs both view modes; switching modes carries the text
//! over unchanged so the edit and preview views stay synchronized. Updates
//! are applied atomically under the store lock after each async step, and a
//! failed optimization never touches stored text.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

pub mod handlers;

/// The two views of the single-page editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Edit,
    Preview,
}

/// One editor session.
#[derive(Debug, Clone, Serialize)]
pub struct EditorSession {
    pub id: Uuid,
    /// Current document text in the editor's markdown dialect.
    pub text: String,
    pub mode: EditorMode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// In-memory session store. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, EditorSession>>>,
}

impl SessionStore {
    pub async fn create(&self, initial_text: Option<String>) -> EditorSession {
        let now = Utc::now();
        let session = EditorSession {
            id: Uuid::new_v4(),
            text: initial_text.unwrap_or_default(),
            mode: EditorMode::default(),
            created_at: now,
            updated_at: now,
        };
        self.inner
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<EditorSession> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Replaces the document text atomically. Returns the updated session,
    /// or `None` if it does not exist.
    pub async fn set_text(&self, id: Uuid, text: String) -> Option<EditorSession> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id)?;
        session.text = text;
        session.updated_at = Utc::now();
        Some(session.clone())
    }

    /// Switches the view mode, carrying the text over unchanged.
    pub async fn set_mode(&self, id: Uuid, mode: EditorMode) -> Option<EditorSession> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id)?;
        session.mode = mode;
        session.updated_at = Utc::now();
        Some(session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let store = SessionStore::default();
        let created = store.create(Some("# Jane".to_string())).await;
        assert_eq!(created.mode, EditorMode::Edit);

        let fetched = store.get(created.id).await.expect("session exists");
        assert_eq!(fetched.text, "# Jane");
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn test_create_without_text_is_empty() {
        let store = SessionStore::default();
        let session = store.create(None).await;
        assert!(session.text.is_empty());
    }

    #[tokio::test]
    async fn test_set_text_replaces_and_bumps_updated_at() {
        let store = SessionStore::default();
        let session = store.create(Some("old".to_string())).await;

        let updated = store
            .set_text(session.id, "new".to_string())
            .await
            .expect("session exists");
        assert_eq!(updated.text, "new");
        assert!(updated.updated_at >= session.updated_at);
    }

    #[tokio::test]
    async fn test_mode_switch_preserves_text() {
        let store = SessionStore::default();
        let session = store.create(Some("# Jane".to_string())).await;

        let previewing = store
            .set_mode(session.id, EditorMode::Preview)
            .await
            .expect("session exists");
        assert_eq!(previewing.mode, EditorMode::Preview);
        assert_eq!(previewing.text, "# Jane", "mode switch must not change text");

        let editing = store
            .set_mode(session.id, EditorMode::Edit)
            .await
            .expect("session exists");
        assert_eq!(editing.text, "# Jane");
    }

    #[tokio::test]
    async fn test_unknown_session_returns_none() {
        let store = SessionStore::default();
        assert!(store.get(Uuid::new_v4()).await.is_none());
        assert!(store
            .set_text(Uuid::new_v4(), "x".to_string())
            .await
            .is_none());
        assert!(store
            .set_mode(Uuid::new_v4(), EditorMode::Preview)
            .await
            .is_none());
    }
}
