use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::translation::requester::request_translation;

#[derive(Deserialize)]
pub struct TranslationRequest {
    pub session_id: Uuid,
    pub phrase: String,
}

#[derive(Serialize)]
pub struct TranslationResponse {
    pub translation: String,
}

/// POST /api/v1/translate
pub async fn handle_translate(
    State(state): State<AppState>,
    Json(req): Json<TranslationRequest>,
) -> Result<Json<TranslationResponse>, AppError> {
    if req.phrase.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter a Korean phrase first".to_string(),
        ));
    }
    if !state.sessions.contains(req.session_id).await {
        return Err(AppError::NotFound(format!(
            "Session {} not found",
            req.session_id
        )));
    }

    let translation = request_translation(state.llm.as_ref(), &req.phrase).await?;

    let value = translation.clone();
    let stored = state
        .sessions
        .update(req.session_id, move |ctx| {
            ctx.last_translation = Some(value);
        })
        .await;
    if !stored {
        tracing::warn!(
            "session {} was deleted mid-request; translation not stored",
            req.session_id
        );
    }

    Ok(Json(TranslationResponse { translation }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::extract::State;
    use axum::Json;

    use super::*;
    use crate::config::Config;
    use crate::feedback::rubric::Rubric;
    use crate::llm_client::{LlmError, LlmRequest, TextGenerator};
    use crate::session::SessionStore;

    /// Deletes its own session while the call is in flight.
    struct SessionDroppingGenerator {
        sessions: SessionStore,
        id: Uuid,
    }

    #[async_trait]
    impl TextGenerator for SessionDroppingGenerator {
        fn ensure_configured(&self) -> Result<(), LlmError> {
            Ok(())
        }

        async fn generate(&self, _request: LlmRequest<'_>) -> Result<String, LlmError> {
            self.sessions.delete(self.id).await;
            Ok(r#"{"translation": "He is a great inventor."}"#.to_string())
        }
    }

    #[tokio::test]
    async fn test_session_deleted_mid_call_still_returns_translation() {
        let sessions = SessionStore::new();
        let id = sessions.create().await;
        let state = AppState {
            llm: Arc::new(SessionDroppingGenerator {
                sessions: sessions.clone(),
                id,
            }),
            config: Config {
                gemini_api_key: Some("test-key".to_string()),
                teacher_email: None,
                port: 0,
                rust_log: "info".to_string(),
            },
            rubric: Rubric::default(),
            sessions: sessions.clone(),
        };

        let Json(resp) = handle_translate(
            State(state),
            Json(TranslationRequest {
                session_id: id,
                phrase: "그는 발명가예요".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(resp.translation, "He is a great inventor.");
        assert!(sessions.snapshot(id).await.is_none());
    }
}
