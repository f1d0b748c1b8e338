//! Per-session writing context.
//!
//! One session per student visit: created empty, mutated only by that
//! session's own handlers, discarded on delete. In-memory only — there is no
//! durability requirement across restarts.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Advisory metadata about an uploaded portrait photo. The image bytes are
/// never consumed by the feedback or translation paths.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoMeta {
    pub file_name: String,
    pub size_bytes: usize,
}

/// Everything one session holds between button clicks.
#[derive(Debug, Clone, Serialize)]
pub struct SessionContext {
    pub last_essay: Option<String>,
    pub last_feedback: Option<String>,
    pub last_translation: Option<String>,
    pub uploaded_photo: Option<PhotoMeta>,
    pub created_at: DateTime<Utc>,
}

impl SessionContext {
    fn new() -> Self {
        Self {
            last_essay: None,
            last_feedback: None,
            last_translation: None,
            uploaded_photo: None,
            created_at: Utc::now(),
        }
    }
}

/// Shared map of live sessions. The lock is held only across field
/// reads/writes, never across an LLM call.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, SessionContext::new());
        id
    }

    pub async fn snapshot(&self, id: Uuid) -> Option<SessionContext> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    /// Applies `mutate` to the session, or returns `false` if it does not exist.
    pub async fn update<F>(&self, id: Uuid, mutate: F) -> bool
    where
        F: FnOnce(&mut SessionContext),
    {
        match self.sessions.write().await.get_mut(&id) {
            Some(ctx) => {
                mutate(ctx);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = SessionStore::new();
        let id = store.create().await;

        let ctx = store.snapshot(id).await.unwrap();
        assert!(ctx.last_essay.is_none());
        assert!(ctx.last_feedback.is_none());
        assert!(ctx.last_translation.is_none());
        assert!(ctx.uploaded_photo.is_none());

        assert!(
            store
                .update(id, |ctx| ctx.last_essay = Some("He was a king.".to_string()))
                .await
        );
        assert_eq!(
            store.snapshot(id).await.unwrap().last_essay.as_deref(),
            Some("He was a king.")
        );

        assert!(store.delete(id).await);
        assert!(store.snapshot(id).await.is_none());
        assert!(!store.delete(id).await);
    }

    #[tokio::test]
    async fn test_update_unknown_session_is_rejected() {
        let store = SessionStore::new();
        assert!(!store.update(Uuid::new_v4(), |_| {}).await);
    }
}
