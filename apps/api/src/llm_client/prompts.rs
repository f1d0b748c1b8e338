// Cross-cutting sampling settings. Each feature module defines its own
// prompt text in a prompts.rs alongside it.

/// Low randomness for rubric feedback: accuracy over creative variation.
pub const FEEDBACK_TEMPERATURE: f32 = 0.3;

/// Near-deterministic sampling for translation.
pub const TRANSLATION_TEMPERATURE: f32 = 0.1;
