//! Tailoring stage: sends the parsed resume and the filtered posting to the
//! chat model and renders its structured suggestions for the terminal.

pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::tailor::prompts::{TAILOR_PROMPT_TEMPLATE, TAILOR_SYSTEM};

/// Structured tailoring suggestions returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoringSuggestions {
    pub line_suggestions: String,
    pub big_picture_edits: String,
    pub compliment: String,
}

const FALLBACK_COMPLIMENT: &str = "Overall, this resume already looks strong - just refine it \
    with these details to make it stand out even more.";

/// Asks the model for tailoring suggestions grounded in both inputs.
pub async fn tailor_resume(
    llm: &LlmClient,
    resume_text: &str,
    job_text: &str,
) -> Result<TailoringSuggestions, AppError> {
    let prompt = TAILOR_PROMPT_TEMPLATE
        .replace("{job_text}", job_text)
        .replace("{resume_text}", resume_text);

    llm.complete_json::<TailoringSuggestions>(&prompt, TAILOR_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Tailoring suggestions failed: {e}")))
}

/// Renders suggestions for the terminal and the output artifact. Sections the
/// model declined to fill are omitted; the closing compliment always appears,
/// without a header.
pub fn render_suggestions(suggestions: &TailoringSuggestions) -> String {
    let mut sections = Vec::new();

    if has_content(&suggestions.line_suggestions) {
        sections.push(format!(
            "=== Line-Specific Suggestions ===\n{}",
            suggestions.line_suggestions.trim()
        ));
    }
    if has_content(&suggestions.big_picture_edits) {
        sections.push(format!(
            "=== Big-Picture Edits ===\n{}",
            suggestions.big_picture_edits.trim()
        ));
    }

    let compliment = if has_content(&suggestions.compliment) {
        suggestions.compliment.trim()
    } else {
        FALLBACK_COMPLIMENT
    };

    format!("{}\n\n{}", sections.join("\n\n"), compliment)
        .trim()
        .to_string()
}

fn has_content(section: &str) -> bool {
    let trimmed = section.trim();
    !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("none")
}
