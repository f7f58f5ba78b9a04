//! Prompt Builder
//!
//! Renders the question-type template for one (persona, question) pair.

use std::collections::HashMap;

use persona_survey_core::{Persona, Question, RatingScale};

use super::template::{safe_substitute, PromptTemplates};
use crate::utils::error::{AppError, AppResult};

/// Rendered for any persona attribute that was not provided
pub const UNKNOWN: &str = "未知";
/// Rendered for family background / wealth level when not provided
pub const NO_INFORMATION: &str = "無相關資訊";
/// Rendered when a persona has no activity history
pub const NO_ACTIVITY_RECORD: &str = "無活動記錄";

/// Builds generation prompts from templates and persona attributes.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    templates: PromptTemplates,
    history_chars: usize,
    rating: RatingScale,
}

impl PromptBuilder {
    pub fn new(templates: PromptTemplates, history_chars: usize, rating: RatingScale) -> Self {
        Self {
            templates,
            history_chars,
            rating,
        }
    }

    pub fn templates(&self) -> &PromptTemplates {
        &self.templates
    }

    /// Render the prompt for `persona` answering `question`.
    ///
    /// Fails only when the question's type has no template.
    pub fn build(&self, persona: &Persona, question: &Question) -> AppResult<String> {
        let template = self
            .templates
            .get(question.question_type)
            .ok_or(AppError::TemplateMissing(question.question_type))?;

        let vars = self.variables(persona, question);
        Ok(safe_substitute(template, &vars))
    }

    fn variables(&self, persona: &Persona, question: &Question) -> HashMap<&'static str, String> {
        let options = if question.question_type.is_choice() {
            format_options(&question.options)
        } else {
            String::new()
        };

        HashMap::from([
            ("agent_name", persona.name.clone()),
            (
                "age",
                persona.age.map_or_else(|| UNKNOWN.to_string(), |a| a.to_string()),
            ),
            ("personality", join_or_unknown(&persona.personality)),
            ("interests", join_or_unknown(&persona.interests)),
            ("lifestyle", or_default(&persona.lifestyle, UNKNOWN)),
            ("current_activity", or_default(&persona.current_activity, UNKNOWN)),
            (
                "family_background",
                or_default(&persona.family_background, NO_INFORMATION),
            ),
            ("wealth_level", or_default(&persona.wealth_level, NO_INFORMATION)),
            ("activity_history", self.activity_history(persona)),
            ("question_text", question.text.clone()),
            ("options", options),
            ("rating_min", self.rating.min.to_string()),
            ("rating_max", self.rating.max.to_string()),
        ])
    }

    fn activity_history(&self, persona: &Persona) -> String {
        if !persona.has_history() {
            return NO_ACTIVITY_RECORD.to_string();
        }
        let joined = persona.activity_history.join("\n");
        tail_chars(&joined, self.history_chars).to_string()
    }
}

/// `1. A\n2. B`; empty when there are no options.
pub fn format_options(options: &[String]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("{}. {}", i + 1, option))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The last `n` characters of `text`, never splitting a code point.
pub fn tail_chars(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((start, _)) => &text[start..],
        None => text,
    }
}

fn join_or_unknown(items: &[String]) -> String {
    if items.is_empty() {
        UNKNOWN.to_string()
    } else {
        items.join(", ")
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}
