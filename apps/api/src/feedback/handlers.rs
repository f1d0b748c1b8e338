use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::requester::request_feedback;
use crate::feedback::rubric::sentence_count;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FeedbackRequest {
    pub session_id: Uuid,
    pub essay_text: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
    pub sentence_count: usize,
}

/// POST /api/v1/feedback
///
/// The empty-essay guard lives here, not in the requester: it is a UI-level
/// check, mirrored server-side so a bare API client gets the same message.
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    if req.essay_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Please write your essay first".to_string(),
        ));
    }
    if !state.sessions.contains(req.session_id).await {
        return Err(AppError::NotFound(format!(
            "Session {} not found",
            req.session_id
        )));
    }

    let session_id = req.session_id;
    let count = sentence_count(&req.essay_text);
    let feedback = request_feedback(state.llm.as_ref(), &state.rubric, &req.essay_text).await?;

    let essay = req.essay_text;
    let stored_feedback = feedback.clone();
    let stored = state
        .sessions
        .update(session_id, move |ctx| {
            ctx.last_essay = Some(essay);
            ctx.last_feedback = Some(stored_feedback);
        })
        .await;
    // The session can be deleted while the LLM call is in flight; the student
    // still gets their feedback, it just isn't kept for the mail draft.
    if !stored {
        tracing::warn!("session {session_id} was deleted mid-request; feedback not stored");
    }

    Ok(Json(FeedbackResponse {
        feedback,
        sentence_count: count,
    }))
}
