use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::{PhotoMeta, SessionContext};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let session_id = state.sessions.create().await;
    tracing::debug!("session {session_id} created");
    (
        StatusCode::CREATED,
        Json(SessionCreatedResponse { session_id }),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionContext>, AppError> {
    state
        .sessions
        .snapshot(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.delete(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// POST /api/v1/sessions/:id/photo
///
/// Accepts a multipart upload of the figure's portrait. Advisory only: the
/// session records the file name and size so the page can confirm the upload,
/// but the bytes are dropped — nothing downstream reads the image.
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<PhotoMeta>, AppError> {
    if !state.sessions.contains(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("photo") {
            continue;
        }

        let file_name = field
            .file_name()
            .unwrap_or("portrait")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let meta = PhotoMeta {
            file_name,
            size_bytes: bytes.len(),
        };
        let stored = meta.clone();
        state
            .sessions
            .update(id, move |ctx| ctx.uploaded_photo = Some(stored))
            .await;
        return Ok(Json(meta));
    }

    Err(AppError::Validation(
        "Expected a multipart field named 'photo'".to_string(),
    ))
}
