//! Analytics Models
//!
//! Data structures for per-question survey statistics and survey summaries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response counts for a survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    /// All responses, completed or not
    pub total_responses: usize,
    /// Responses with `completed_at` set
    pub completed_responses: usize,
    /// completed / total * 100, or 0 when there are no responses
    pub completion_rate: f64,
}

impl ResponseSummary {
    pub fn new(total_responses: usize, completed_responses: usize) -> Self {
        Self {
            total_responses,
            completed_responses,
            completion_rate: percentage(completed_responses, total_responses),
        }
    }
}

/// Count and share of one declared option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionCount {
    pub option: String,
    pub count: usize,
    pub percentage: f64,
}

/// Statistics for single- and multiple-choice questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceStats {
    /// Answers analyzed, including ones that match no option
    pub total_responses: usize,
    /// One entry per declared option, in declaration order
    pub choices: Vec<OptionCount>,
}

impl ChoiceStats {
    pub fn count(&self, option: &str) -> Option<usize> {
        self.choices.iter().find(|c| c.option == option).map(|c| c.count)
    }

    pub fn percentage(&self, option: &str) -> Option<f64> {
        self.choices
            .iter()
            .find(|c| c.option == option)
            .map(|c| c.percentage)
    }
}

/// Statistics for rating questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingStats {
    /// Answers that coerced to an integer
    pub total_responses: usize,
    pub average: f64,
    pub min: i64,
    pub max: i64,
    /// Score -> count over every value of the rating scale
    pub distribution: BTreeMap<i64, usize>,
}

/// A frequent word in free-text answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Statistics for free-text questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    pub total_responses: usize,
    /// Mean answer length in characters
    pub average_length: f64,
    /// Up to ten most frequent words, most frequent first
    pub common_words: Vec<WordCount>,
}

/// Statistics for one question, tagged by question type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionStats {
    SingleChoice(ChoiceStats),
    MultipleChoice(ChoiceStats),
    Rating(RatingStats),
    Text(TextStats),
}

impl QuestionStats {
    /// Number of answers the statistics were computed over
    pub fn total_responses(&self) -> usize {
        match self {
            QuestionStats::SingleChoice(s) | QuestionStats::MultipleChoice(s) => s.total_responses,
            QuestionStats::Rating(s) => s.total_responses,
            QuestionStats::Text(s) => s.total_responses,
        }
    }
}

/// Per-question analytics entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionAnalytics {
    pub question_id: u32,
    pub question_text: String,
    #[serde(flatten)]
    pub stats: QuestionStats,
}

/// Full analytics for a survey
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyAnalytics {
    pub survey_id: String,
    pub title: String,
    pub question_count: usize,
    pub summary: ResponseSummary,
    /// In question display order
    pub questions: Vec<QuestionAnalytics>,
}

impl SurveyAnalytics {
    pub fn question(&self, question_id: u32) -> Option<&QuestionStats> {
        self.questions
            .iter()
            .find(|q| q.question_id == question_id)
            .map(|q| &q.stats)
    }
}

/// Overview of a stored survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyStats {
    pub survey_id: String,
    pub title: String,
    pub question_count: usize,
    pub total_responses: usize,
    pub completed_responses: usize,
    /// Percent, 0 when there are no responses
    pub completion_rate: f64,
    pub created_at: DateTime<Utc>,
}

/// `part / whole * 100`, or 0 when `whole` is 0
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
