// All LLM prompt constants for the feedback module.

use crate::feedback::rubric::Rubric;

/// System prompt for rubric feedback. The response is free-form prose — no
/// JSON constraint here.
pub const FEEDBACK_SYSTEM: &str = "You are an English writing tutor for a \
    first-year middle-school student. The student has written a short essay \
    introducing a great historical figure. Evaluate it against the checklist \
    you are given, then help the student improve. Be encouraging and concrete.";

/// Feedback prompt template. Placeholders: `{checklist}`, `{min_sentences}`,
/// `{sentence_count}`, `{essay}`.
const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Give feedback on the student's essay in three steps.

STEP 1 — Requirement check:
Judge each checklist item separately and mark it O or X:
{checklist}
- Has at least {min_sentences} sentences (currently {sentence_count}, counted by periods): (O/X)

STEP 2 — Fluency and corrections:
Find grammar, vocabulary, spelling, capitalization, and punctuation errors, and
show the corrected sentence for each. If there are no errors, say "No errors".

STEP 3 — Overall feedback:
Comment on whether the essay flows naturally, point out any X items from
step 1, and suggest concretely how to fix them, with short example phrases.

READING LEVEL: the student is a beginner. Any sentence you suggest must avoid
relative pronouns and advanced vocabulary.

STUDENT'S ESSAY:
"{essay}"
"#;

/// Renders the full feedback prompt for one essay.
pub fn build_feedback_prompt(rubric: &Rubric, sentence_count: usize, essay: &str) -> String {
    FEEDBACK_PROMPT_TEMPLATE
        .replace("{checklist}", &rubric.render_checklist())
        .replace("{min_sentences}", &rubric.min_sentences.to_string())
        .replace("{sentence_count}", &sentence_count.to_string())
        .replace("{essay}", essay)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_essay_and_counts() {
        let rubric = Rubric::default();
        let prompt = build_feedback_prompt(&rubric, 2, "He is tall. He is kind.");
        assert!(prompt.contains("\"He is tall. He is kind.\""));
        assert!(prompt.contains("currently 2"));
        assert!(prompt.contains("at least 7 sentences"));
        assert!(prompt.contains("Includes the figure's occupation"));
        assert!(!prompt.contains("{essay}"));
        assert!(!prompt.contains("{checklist}"));
    }
}
