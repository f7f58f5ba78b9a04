//! Batch Reports
//!
//! What happened to each persona in a fill batch.

use persona_survey_core::Response;
use serde::Serialize;

use crate::services::validation::ValidationWarning;

/// A parsing warning raised for one question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionWarning {
    pub question_id: u32,
    pub warning: ValidationWarning,
}

/// Result of filling the survey for one persona
#[derive(Debug, Clone, Serialize)]
pub struct PersonaOutcome {
    pub persona: String,
    /// The completed response, if one was produced
    pub response: Option<Response>,
    /// Why the fill failed; `None` means the response was completed and stored
    pub error: Option<String>,
    /// Questions answered from the fallback table after a generation failure
    pub fallback_answers: Vec<u32>,
    pub warnings: Vec<QuestionWarning>,
}

impl PersonaOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.response.is_some()
    }

    pub fn response_id(&self) -> Option<&str> {
        self.response.as_ref().map(|r| r.id.as_str())
    }
}

/// Per-persona outcomes of one batch, in persona order
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub survey_id: String,
    pub outcomes: Vec<PersonaOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Completed responses, in persona order
    pub fn responses(&self) -> impl Iterator<Item = &Response> {
        self.outcomes.iter().filter_map(|o| o.response.as_ref())
    }

    pub fn outcome(&self, persona: &str) -> Option<&PersonaOutcome> {
        self.outcomes.iter().find(|o| o.persona == persona)
    }
}
