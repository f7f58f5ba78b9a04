//! Response Types
//!
//! A `Response` is created when a persona starts filling a survey, gains one
//! answer per question, and is completed once every question is answered.
//! Completed responses are never mutated again.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::survey::Survey;

/// A typed answer. Its shape follows the owning question's type:
/// text for single choice and free text, a list for multiple choice, an
/// integer for ratings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Rating(i64),
    Choices(Vec<String>),
    Text(String),
}

impl Answer {
    /// Text payload, if this is a text-shaped answer.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Selected options, if this is a list-shaped answer.
    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            Answer::Choices(choices) => Some(choices),
            _ => None,
        }
    }

    /// Numeric coercion used by analytics: integers as-is, text that parses
    /// as an integer, nothing else.
    pub fn as_rating(&self) -> Option<i64> {
        match self {
            Answer::Rating(value) => Some(*value),
            Answer::Text(text) => text.trim().parse().ok(),
            Answer::Choices(_) => None,
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Rating(value) => write!(f, "{}", value),
            Answer::Choices(choices) => write!(f, "{}", choices.join(", ")),
            Answer::Text(text) => write!(f, "{}", text),
        }
    }
}

/// One persona's answers to one survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "response_id")]
    pub id: String,
    pub survey_id: String,
    /// Persona name of the respondent
    #[serde(rename = "respondent_name")]
    pub respondent: String,
    /// Question id -> answer
    #[serde(rename = "responses", default)]
    pub answers: BTreeMap<u32, Answer>,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Response {
    /// Start a new, empty response.
    pub fn new(survey_id: impl Into<String>, respondent: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            survey_id: survey_id.into(),
            respondent: respondent.into(),
            answers: BTreeMap::new(),
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Record the answer for a question. Each question is answered once.
    pub fn record_answer(&mut self, question_id: u32, answer: Answer) -> CoreResult<()> {
        if self.is_completed() {
            return Err(CoreError::validation(format!(
                "Response {} is already completed",
                self.id
            )));
        }
        if self.answers.contains_key(&question_id) {
            return Err(CoreError::DuplicateAnswer { question_id });
        }
        self.answers.insert(question_id, answer);
        Ok(())
    }

    /// Mark the response completed. Every question the survey defines must
    /// be answered and no answer may reference an unknown question.
    pub fn complete(&mut self, survey: &Survey) -> CoreResult<()> {
        if self.survey_id != survey.id {
            return Err(CoreError::validation(format!(
                "Response {} belongs to survey {}, not {}",
                self.id, self.survey_id, survey.id
            )));
        }
        if let Some(&question_id) = self
            .answers
            .keys()
            .find(|id| survey.question(**id).is_none())
        {
            return Err(CoreError::UnknownQuestion {
                survey_id: survey.id.clone(),
                question_id,
            });
        }
        let missing: Vec<u32> = survey
            .question_ids()
            .filter(|id| !self.answers.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::Incomplete { missing });
        }
        if self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn answer(&self, question_id: u32) -> Option<&Answer> {
        self.answers.get(&question_id)
    }
}
