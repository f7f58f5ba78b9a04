//! Survey Types
//!
//! Surveys are authored once and are read-only to the answer pipeline.
//! Question ids are assigned at append time: 1-based, strictly increasing,
//! no gaps, so insertion order is display order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// The closed set of question types a survey can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Pick exactly one declared option
    SingleChoice,
    /// Pick any number of declared options
    MultipleChoice,
    /// Integer score within the configured rating scale
    Rating,
    /// Free-form text
    Text,
}

impl QuestionType {
    /// All question types, in declaration order.
    pub const ALL: [QuestionType; 4] = [
        QuestionType::SingleChoice,
        QuestionType::MultipleChoice,
        QuestionType::Rating,
        QuestionType::Text,
    ];

    /// Stable identifier, also used to address prompt templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "single_choice",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::Rating => "rating",
            QuestionType::Text => "text",
        }
    }

    /// Whether questions of this type carry a list of options.
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultipleChoice)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QuestionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single_choice" => Ok(QuestionType::SingleChoice),
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "rating" => Ok(QuestionType::Rating),
            "text" => Ok(QuestionType::Text),
            other => Err(CoreError::validation(format!(
                "Unknown question type: {}",
                other
            ))),
        }
    }
}

/// A single survey question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position in the survey
    pub id: u32,
    /// Declared answer type
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Question wording shown to the respondent
    pub text: String,
    /// Declared options (choice types only)
    #[serde(default)]
    pub options: Vec<String>,
    /// Whether the question is marked as required
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl Question {
    /// Check the options invariant: non-empty iff the type is a choice type.
    pub fn validate(&self) -> CoreResult<()> {
        if self.question_type.is_choice() && self.options.is_empty() {
            return Err(CoreError::validation(format!(
                "Question {} is {} but declares no options",
                self.id, self.question_type
            )));
        }
        if !self.question_type.is_choice() && !self.options.is_empty() {
            return Err(CoreError::validation(format!(
                "Question {} is {} and must not declare options",
                self.id, self.question_type
            )));
        }
        Ok(())
    }
}

/// A survey: metadata plus an ordered list of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    /// Opaque, globally unique identifier
    #[serde(rename = "survey_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

impl Survey {
    /// Create an empty survey with a fresh UUID.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), title, description)
    }

    /// Create an empty survey with an explicit id.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            questions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Append a question and return its assigned id.
    pub fn add_question(
        &mut self,
        question_type: QuestionType,
        text: impl Into<String>,
        options: Vec<String>,
        required: bool,
    ) -> CoreResult<u32> {
        let question = Question {
            id: self.questions.len() as u32 + 1,
            question_type,
            text: text.into(),
            options,
            required,
        };
        question.validate()?;
        let id = question.id;
        self.questions.push(question);
        Ok(id)
    }

    /// Look up a question by id.
    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Question ids in display order.
    pub fn question_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.questions.iter().map(|q| q.id)
    }

    /// Validate the id sequence and every question's options invariant.
    ///
    /// Used for surveys that did not go through `add_question`, e.g. ones
    /// read back from storage or imported from a document.
    pub fn validate(&self) -> CoreResult<()> {
        for (index, question) in self.questions.iter().enumerate() {
            let expected = index as u32 + 1;
            if question.id != expected {
                return Err(CoreError::validation(format!(
                    "Survey {}: question at position {} has id {}, expected {}",
                    self.id, expected, question.id, expected
                )));
            }
            question.validate()?;
        }
        Ok(())
    }

    /// Copy this survey's questions into a new survey with a fresh id.
    pub fn duplicate(&self, new_title: Option<&str>) -> Survey {
        let title = new_title
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} (複製)", self.title));
        let mut copy = Survey::new(title, self.description.clone());
        copy.questions = self.questions.clone();
        copy
    }
}
