//! Survey Import
//!
//! Builds a survey from a JSON document:
//!
//! ```json
//! {"title": "...", "description": "...",
//!  "questions": [{"type": "single_choice", "text": "...", "options": ["A", "B"]}]}
//! ```
//!
//! Common aliases from form builders are accepted (`radio`, `checkbox`,
//! `scale`, `paragraph`, `question` for `text`, `choices` for `options`).
//! The imported survey always gets a fresh id.

use std::path::Path;

use persona_survey_core::{QuestionType, Survey};
use serde::Deserialize;

use crate::utils::error::{AppError, AppResult};

const UNTITLED: &str = "未命名問卷";

#[derive(Debug, Deserialize)]
struct ImportDocument {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    questions: Vec<ImportQuestion>,
}

#[derive(Debug, Deserialize)]
struct ImportQuestion {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    choices: Option<Vec<String>>,
    #[serde(default)]
    required: Option<bool>,
}

/// Map a type name or alias to a question type.
pub fn normalize_question_type(kind: &str) -> AppResult<QuestionType> {
    match kind.trim().to_lowercase().as_str() {
        "single_choice" | "choice" | "radio" => Ok(QuestionType::SingleChoice),
        "multiple_choice" | "checkbox" => Ok(QuestionType::MultipleChoice),
        "rating" | "scale" => Ok(QuestionType::Rating),
        "text" | "short_answer" | "paragraph" => Ok(QuestionType::Text),
        other => Err(AppError::validation(format!(
            "Unsupported question type: {}",
            other
        ))),
    }
}

/// Parse a survey document.
pub fn import_survey_json(content: &str) -> AppResult<Survey> {
    let document: ImportDocument = serde_json::from_str(content)?;

    let title = document
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());
    let mut survey = Survey::new(title, document.description.unwrap_or_default());

    for (index, question) in document.questions.into_iter().enumerate() {
        let question_type = normalize_question_type(question.kind.as_deref().unwrap_or("text"))?;
        let text = question.text.or(question.question).unwrap_or_default();
        let options = if question_type.is_choice() {
            question.options.or(question.choices).unwrap_or_default()
        } else {
            Vec::new()
        };

        survey
            .add_question(question_type, text, options, question.required.unwrap_or(true))
            .map_err(|e| AppError::validation(format!("Question {}: {}", index + 1, e)))?;
    }

    tracing::info!(
        survey_id = %survey.id,
        questions = survey.questions.len(),
        "survey imported"
    );
    Ok(survey)
}

/// Parse a survey document from a file.
pub fn import_survey_file(path: &Path) -> AppResult<Survey> {
    let content = std::fs::read_to_string(path)?;
    import_survey_json(&content)
}
