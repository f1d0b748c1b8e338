// All LLM prompt constants for the translation module.

use serde_json::{json, Value};

/// System instruction for the Korean→English helper. One direction only, one
/// JSON object out, never Korean script in the value.
pub const TRANSLATION_SYSTEM: &str = "You are a one-directional Korean to English \
    translator for a middle-school student. \
    Translate the given Korean phrase into simple, natural English. \
    You MUST respond with exactly one JSON object of the shape \
    {\"translation\": string} and nothing else. \
    Do NOT use markdown code fences. \
    The translation value must NEVER contain Korean script.";

/// Response schema forcing the provider into single-field JSON output.
pub fn translation_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "translation": { "type": "string" }
        },
        "required": ["translation"]
    })
}

pub fn build_translation_prompt(phrase: &str) -> String {
    format!("Translate this Korean phrase into English: {phrase}")
}
