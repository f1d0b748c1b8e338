//! Mail-draft composer.
//!
//! Packages the finished essay and its feedback into a `mailto:` URI with
//! percent-encoded subject and body. Pure string templating — nothing here
//! sends mail; opening the draft is the mail client's job.

use axum::{extract::State, Json};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

const MAIL_SUBJECT: &str = "My Great Figure Essay";

/// Builds the `mailto:` URI for one essay/feedback pair.
///
/// Encoding uses `NON_ALPHANUMERIC` so decoding the subject or body recovers
/// the literal text unaltered, whatever it contains.
pub fn compose_mailto(essay: &str, feedback: &str, recipient: &str) -> String {
    let body = format!(
        "Hello,\n\nHere is my finished essay about a great historical figure.\n\n\
         === My essay ===\n{essay}\n\n\
         === AI tutor feedback ===\n{feedback}\n\n\
         Thank you!"
    );

    format!(
        "mailto:{recipient}?subject={}&body={}",
        utf8_percent_encode(MAIL_SUBJECT, NON_ALPHANUMERIC),
        utf8_percent_encode(&body, NON_ALPHANUMERIC)
    )
}

#[derive(Deserialize)]
pub struct MailDraftRequest {
    pub session_id: Uuid,
    /// Overrides the configured `TEACHER_EMAIL` when present.
    pub recipient: Option<String>,
}

#[derive(Serialize)]
pub struct MailDraftResponse {
    pub mailto: String,
}

/// POST /api/v1/mail-draft
pub async fn handle_mail_draft(
    State(state): State<AppState>,
    Json(req): Json<MailDraftRequest>,
) -> Result<Json<MailDraftResponse>, AppError> {
    let recipient = req
        .recipient
        .filter(|r| !r.trim().is_empty())
        .or_else(|| state.config.teacher_email.clone())
        .ok_or_else(|| {
            AppError::Validation("No recipient given and TEACHER_EMAIL is not set".to_string())
        })?;

    let ctx = state
        .sessions
        .snapshot(req.session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", req.session_id)))?;

    let (essay, feedback) = match (ctx.last_essay, ctx.last_feedback) {
        (Some(essay), Some(feedback)) => (essay, feedback),
        _ => {
            return Err(AppError::UnprocessableEntity(
                "Request feedback on your essay before composing the mail draft".to_string(),
            ))
        }
    };

    Ok(Json(MailDraftResponse {
        mailto: compose_mailto(&essay, &feedback, &recipient),
    }))
}
