use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The Gemini API key is intentionally NOT required at startup: a missing key
/// is surfaced as a per-request configuration error, so the server still boots
/// and every other endpoint keeps working.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    /// Default recipient for composed mail drafts when the request omits one.
    pub teacher_email: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            teacher_email: optional_env("TEACHER_EMAIL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Treats unset and empty variables the same, so `GEMINI_API_KEY=""` behaves
/// like an absent key.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
