use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::feedback::requester::FeedbackError;
use crate::translation::requester::TranslationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// No variant terminates the process: every error becomes a JSON body the
/// page can display next to the button that triggered it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Empty translation")]
    EmptyTranslation,

    #[error("Language constraint violation: {0}")]
    LanguageConstraint(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CONFIGURATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::Provider(msg) => {
                tracing::error!("Provider error: {msg}");
                (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", msg.clone())
            }
            // Contract violations by the model keep their diagnostic detail:
            // the raw output is what the user needs to see to understand the failure.
            AppError::MalformedResponse(msg) => (
                StatusCode::BAD_GATEWAY,
                "MALFORMED_RESPONSE",
                msg.clone(),
            ),
            AppError::EmptyTranslation => (
                StatusCode::BAD_GATEWAY,
                "EMPTY_TRANSLATION",
                "The model returned an empty translation".to_string(),
            ),
            AppError::LanguageConstraint(msg) => (
                StatusCode::BAD_GATEWAY,
                "LANGUAGE_CONSTRAINT_VIOLATION",
                msg.clone(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<FeedbackError> for AppError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::Configuration(msg) => AppError::Configuration(msg),
            FeedbackError::Provider(msg) => AppError::Provider(msg),
        }
    }
}

impl From<TranslationError> for AppError {
    fn from(err: TranslationError) -> Self {
        match err {
            TranslationError::Configuration(msg) => AppError::Configuration(msg),
            TranslationError::Provider(msg) => AppError::Provider(msg),
            TranslationError::MalformedResponse { ref raw } => {
                AppError::MalformedResponse(format!("not valid JSON: {raw}"))
            }
            TranslationError::EmptyTranslation => AppError::EmptyTranslation,
            TranslationError::LanguageConstraintViolation {
                ref output,
                ref input,
            } => AppError::LanguageConstraint(format!(
                "Korean script in output {output:?} for input {input:?}"
            )),
        }
    }
}
