pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::feedback::handlers::handle_feedback;
use crate::mail::handle_mail_draft;
use crate::session::handlers::{
    handle_create_session, handle_delete_session, handle_get_session, handle_upload_photo,
};
use crate::state::AppState;
use crate::translation::handlers::handle_translate;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session lifecycle
        .route("/api/v1/sessions", post(handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handle_get_session).delete(handle_delete_session),
        )
        .route("/api/v1/sessions/:id/photo", post(handle_upload_photo))
        // Writing assistant
        .route("/api/v1/feedback", post(handle_feedback))
        .route("/api/v1/translate", post(handle_translate))
        .route("/api/v1/mail-draft", post(handle_mail_draft))
        .with_state(state)
}
