//! Korean→English translation requester.
//!
//! The provider is constrained to a single-field JSON object; the reply is
//! then parsed and checked against the contract in order: valid JSON, a
//! non-empty `translation` field, and no Hangul in the value. Whatever
//! survives those checks is returned exactly as received — deliberately no
//! trailing-punctuation normalization or other silent cleanup.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::prompts::TRANSLATION_TEMPERATURE;
use crate::llm_client::{LlmError, LlmRequest, TextGenerator};
use crate::translation::prompts::{
    build_translation_prompt, translation_schema, TRANSLATION_SYSTEM,
};

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Model reply was not the expected JSON object: {raw}")]
    MalformedResponse { raw: String },

    #[error("Model returned an empty translation")]
    EmptyTranslation,

    #[error("Model output {output:?} contains Korean script (input was {input:?})")]
    LanguageConstraintViolation { output: String, input: String },
}

impl From<LlmError> for TranslationError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => TranslationError::Configuration(err.to_string()),
            other => TranslationError::Provider(other.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct TranslationEnvelope {
    #[serde(default)]
    translation: String,
}

/// Requests an English translation of one Korean phrase.
pub async fn request_translation(
    llm: &dyn TextGenerator,
    phrase: &str,
) -> Result<String, TranslationError> {
    llm.ensure_configured()?;

    let prompt = build_translation_prompt(phrase);

    let raw = llm
        .generate(LlmRequest {
            prompt: &prompt,
            system: Some(TRANSLATION_SYSTEM),
            temperature: TRANSLATION_TEMPERATURE,
            response_schema: Some(translation_schema()),
        })
        .await?;

    let envelope: TranslationEnvelope = serde_json::from_str(&raw)
        .map_err(|_| TranslationError::MalformedResponse { raw: raw.clone() })?;

    if envelope.translation.is_empty() {
        return Err(TranslationError::EmptyTranslation);
    }

    // The model sometimes echoes the source phrase instead of translating it;
    // any Hangul syllable in the value is treated as a total failure.
    if contains_hangul(&envelope.translation) {
        return Err(TranslationError::LanguageConstraintViolation {
            output: envelope.translation,
            input: phrase.to_string(),
        });
    }

    debug!("translation succeeded: {} chars", envelope.translation.len());

    Ok(envelope.translation)
}

/// True if any character falls in the Hangul Syllables block (U+AC00–U+D7A3).
fn contains_hangul(text: &str) -> bool {
    text.chars().any(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubGenerator;

    const PHRASE: &str = "그는 위대한 발명가예요";

    #[tokio::test]
    async fn test_translation_returned_exactly_as_received() {
        let stub = StubGenerator::replying(r#"{"translation": "He is a great inventor."}"#);
        let translation = request_translation(&stub, PHRASE).await.unwrap();
        assert_eq!(translation, "He is a great inventor.");
    }

    #[tokio::test]
    async fn test_empty_translation_is_rejected() {
        let stub = StubGenerator::replying(r#"{"translation": ""}"#);
        let err = request_translation(&stub, PHRASE).await.unwrap_err();
        assert!(matches!(err, TranslationError::EmptyTranslation));
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected() {
        let stub = StubGenerator::replying(r#"{"other": "value"}"#);
        let err = request_translation(&stub, PHRASE).await.unwrap_err();
        assert!(matches!(err, TranslationError::EmptyTranslation));
    }

    #[tokio::test]
    async fn test_hangul_in_output_violates_language_constraint() {
        let stub = StubGenerator::replying(r#"{"translation": "그는 대단해요"}"#);
        let err = request_translation(&stub, PHRASE).await.unwrap_err();
        match err {
            TranslationError::LanguageConstraintViolation { output, input } => {
                assert_eq!(output, "그는 대단해요");
                assert_eq!(input, PHRASE);
            }
            other => panic!("expected language constraint violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_reply_preserves_raw_text() {
        let stub = StubGenerator::replying("Sure, here's your translation: He is great.");
        let err = request_translation(&stub, PHRASE).await.unwrap_err();
        match err {
            TranslationError::MalformedResponse { raw } => {
                assert_eq!(raw, "Sure, here's your translation: He is great.");
            }
            other => panic!("expected malformed response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_provider_call() {
        let stub = StubGenerator::unconfigured();
        let err = request_translation(&stub, PHRASE).await.unwrap_err();
        assert!(matches!(err, TranslationError::Configuration(_)));
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn test_contains_hangul_boundaries() {
        assert!(contains_hangul("가"));
        assert!(contains_hangul("힣"));
        assert!(contains_hangul("He said 안녕"));
        assert!(!contains_hangul("He is a great inventor."));
        assert!(!contains_hangul(""));
    }
}
