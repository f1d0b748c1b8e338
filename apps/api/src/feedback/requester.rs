//! Rubric feedback requester.
//!
//! Builds one prompt from the rubric, the computed sentence count, and the
//! verbatim essay, and returns the model's prose unmodified. The essay is
//! assumed non-empty — rejecting empty input is the handler's job.

use thiserror::Error;
use tracing::debug;

use crate::feedback::prompts::{build_feedback_prompt, FEEDBACK_SYSTEM};
use crate::feedback::rubric::{sentence_count, Rubric};
use crate::llm_client::prompts::FEEDBACK_TEMPERATURE;
use crate::llm_client::{LlmError, LlmRequest, TextGenerator};

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

impl From<LlmError> for FeedbackError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => FeedbackError::Configuration(err.to_string()),
            other => FeedbackError::Provider(other.to_string()),
        }
    }
}

/// Requests rubric feedback for one essay. The response is accepted as
/// opaque text: whatever the model says is what the student sees.
pub async fn request_feedback(
    llm: &dyn TextGenerator,
    rubric: &Rubric,
    essay_text: &str,
) -> Result<String, FeedbackError> {
    // Credential check happens before any prompt is built; a missing key
    // must never reach the network path.
    llm.ensure_configured()?;

    let count = sentence_count(essay_text);
    let prompt = build_feedback_prompt(rubric, count, essay_text);
    debug!("requesting feedback: {} sentences counted", count);

    let feedback = llm
        .generate(LlmRequest {
            prompt: &prompt,
            system: Some(FEEDBACK_SYSTEM),
            temperature: FEEDBACK_TEMPERATURE,
            response_schema: None,
        })
        .await?;

    Ok(feedback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubGenerator;

    const ESSAY: &str = "I want to introduce King Sejong. He was a great king.";

    #[tokio::test]
    async fn test_feedback_returned_unmodified() {
        let stub = StubGenerator::replying("STEP 1 - Requirement check:\n- Includes ...");
        let feedback = request_feedback(&stub, &Rubric::default(), ESSAY)
            .await
            .unwrap();
        assert_eq!(feedback, "STEP 1 - Requirement check:\n- Includes ...");
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_provider_call() {
        let stub = StubGenerator::unconfigured();
        let err = request_feedback(&stub, &Rubric::default(), ESSAY)
            .await
            .unwrap_err();
        assert!(matches!(err, FeedbackError::Configuration(_)));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_classified() {
        let stub = StubGenerator::failing(503, "model overloaded");
        let err = request_feedback(&stub, &Rubric::default(), ESSAY)
            .await
            .unwrap_err();
        match err {
            FeedbackError::Provider(msg) => assert!(msg.contains("model overloaded")),
            other => panic!("expected provider error, got {other:?}"),
        }
        assert_eq!(stub.call_count(), 1);
    }
}
