use std::sync::Arc;

use crate::config::Config;
use crate::feedback::rubric::Rubric;
use crate::llm_client::TextGenerator;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one provider seam. Handlers never talk to the Gemini API directly.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
    /// Fixed assignment rubric rendered into every feedback prompt.
    pub rubric: Rubric,
    /// Live per-visit sessions, in-memory only.
    pub sessions: SessionStore,
}
