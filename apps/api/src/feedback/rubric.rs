//! The assignment rubric as data.
//!
//! The checklist lives here as one structured object rather than inline
//! prompt text, so the rubric itself can be tested and changed without
//! touching prompt formatting.

/// Fixed evaluation rubric for the biography assignment.
#[derive(Debug, Clone)]
pub struct Rubric {
    /// Content the essay must include.
    pub content_items: Vec<String>,
    /// Grammatical constructs ("key expressions") the essay must use.
    pub key_expressions: Vec<String>,
    /// Minimum number of complete sentences.
    pub min_sentences: usize,
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            content_items: vec![
                "the figure's occupation, position, or role".to_string(),
                "at least one of the figure's achievements".to_string(),
                "the reason the student thinks the figure is great".to_string(),
                "a description of the figure's appearance".to_string(),
            ],
            key_expressions: vec![
                "a to-infinitive expressing purpose or intention (e.g. 'He worked hard to save the country.')"
                    .to_string(),
                "'because' used to give a reason".to_string(),
                "'look' used to describe appearance (e.g. 'She looks kind.')".to_string(),
            ],
            min_sentences: 7,
        }
    }
}

impl Rubric {
    /// Renders the rubric as checklist lines for embedding in a prompt,
    /// one `- ...: (O/X)` judgement per requirement.
    pub fn render_checklist(&self) -> String {
        let mut lines = Vec::with_capacity(self.content_items.len() + self.key_expressions.len());
        for item in &self.content_items {
            lines.push(format!("- Includes {item}: (O/X)"));
        }
        for expr in &self.key_expressions {
            lines.push(format!("- Uses {expr}: (O/X)"));
        }
        lines.join("\n")
    }
}

/// Counts complete sentences: segments that are non-blank and terminated by a
/// period. Text after the final period is not counted, so `"No period here"`
/// has zero sentences.
pub fn sentence_count(text: &str) -> usize {
    let mut segments: Vec<&str> = text.split('.').collect();
    segments.pop(); // trailing text after the last period, or the whole text if none
    segments.iter().filter(|s| !s.trim().is_empty()).count()
}
