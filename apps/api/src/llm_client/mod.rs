/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One generation request: a user prompt, an optional system instruction,
/// the sampling temperature, and an optional JSON response schema.
///
/// When `response_schema` is set the provider is asked for
/// `application/json` output constrained to that schema.
#[derive(Debug, Clone)]
pub struct LlmRequest<'a> {
    pub prompt: &'a str,
    pub system: Option<&'a str>,
    pub temperature: f32,
    pub response_schema: Option<Value>,
}

/// Seam between the requesters and the Gemini transport, so call sites can be
/// tested against a stub provider.
///
/// `ensure_configured` performs no I/O; requesters call it before building a
/// prompt so a missing credential never results in a network attempt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn ensure_configured(&self) -> Result<(), LlmError>;

    async fn generate(&self, request: LlmRequest<'_>) -> Result<String, LlmError>;
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// Extracts the text of the first candidate's first text part.
    fn text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .find_map(|p| p.text)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single LLM client used by all requesters.
///
/// One attempt per call: provider failures are surfaced to the caller and a
/// repeat is always a manual user action. There is deliberately no retry or
/// backoff layer here.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn ensure_configured(&self) -> Result<(), LlmError> {
        if self.api_key.is_some() {
            Ok(())
        } else {
            Err(LlmError::MissingApiKey)
        }
    }

    async fn generate(&self, request: LlmRequest<'_>) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let request_body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            system_instruction: request.system.map(|text| Content {
                parts: vec![Part { text }],
            }),
            generation_config: GenerationConfig {
                temperature: request.temperature,
                response_mime_type: request.response_schema.is_some().then_some("application/json"),
                response_schema: request.response_schema,
            },
        };

        let response = self
            .client
            .post(format!(
                "{GEMINI_API_BASE}/{MODEL}:generateContent?key={api_key}"
            ))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the provider's error envelope; fall back to the raw body
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Gemini API returned {status}: {message}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        let text = gemini_response.text().ok_or(LlmError::EmptyContent)?;

        debug!("LLM call succeeded: {} chars returned", text.len());

        Ok(text)
    }
}

#[cfg(test)]
pub mod stub {
    //! Stub provider for requester tests: canned replies, no network,
    //! invocation counting so tests can assert a call never happened.

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::{LlmError, LlmRequest, TextGenerator};

    pub struct StubGenerator {
        configured: bool,
        reply: Result<String, (u16, String)>,
        calls: AtomicUsize,
    }

    impl StubGenerator {
        pub fn replying(text: &str) -> Self {
            Self {
                configured: true,
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing(status: u16, message: &str) -> Self {
            Self {
                configured: true,
                reply: Err((status, message.to_string())),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn unconfigured() -> Self {
            Self {
                configured: false,
                reply: Ok(String::new()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        fn ensure_configured(&self) -> Result<(), LlmError> {
            if self.configured {
                Ok(())
            } else {
                Err(LlmError::MissingApiKey)
            }
        }

        async fn generate(&self, _request: LlmRequest<'_>) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err((status, message)) => Err(LlmError::Api {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }
}
