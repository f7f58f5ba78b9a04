//! Answer Validator
//!
//! Turns the outcome of one generation call into a typed answer for the
//! question being asked. Generated text goes through the matching layers for
//! the question's type; a failed call is replaced by the fallback answer for
//! that type. Either way exactly one answer comes out.

use std::fmt;

use persona_survey_core::{Answer, Question, QuestionType, RatingScale};
use persona_survey_llm::{LlmError, LlmResult};
use serde::Serialize;

use super::layers::{first_digit_run, MultipleChoiceLayer, SingleChoiceLayer};

/// Recorded for a single-choice question when no answer could be produced
pub const UNANSWERABLE_CHOICE: &str = "無法回答";

/// Non-fatal problems noticed while parsing generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationWarning {
    /// No layer matched a declared option; the raw text was kept
    AmbiguousMatch,
    /// No digits in a rating answer; the fallback score was used
    UnparseableRating,
    /// The generated text was empty after trimming
    EmptyOutput,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationWarning::AmbiguousMatch => "ambiguous_match",
            ValidationWarning::UnparseableRating => "unparseable_rating",
            ValidationWarning::EmptyOutput => "empty_output",
        };
        f.write_str(name)
    }
}

/// Which rule produced a parsed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedBy {
    SingleChoice(SingleChoiceLayer),
    MultipleChoice(MultipleChoiceLayer),
    /// First digit run, clamped into the rating scale
    DigitRun,
    /// Trimmed free text
    Trimmed,
    /// Nothing matched; raw text or the fallback answer was used
    Unmatched,
}

/// An answer parsed from generated text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAnswer {
    pub answer: Answer,
    pub matched_by: MatchedBy,
    pub warning: Option<ValidationWarning>,
}

impl ParsedAnswer {
    fn matched(answer: Answer, matched_by: MatchedBy) -> Self {
        Self {
            answer,
            matched_by,
            warning: None,
        }
    }

    fn unmatched(answer: Answer, warning: ValidationWarning) -> Self {
        Self {
            answer,
            matched_by: MatchedBy::Unmatched,
            warning: Some(warning),
        }
    }
}

/// Terminal state of one (persona, question) task.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Text was generated and parsed
    Parsed(ParsedAnswer),
    /// Generation failed; the fallback answer stands in
    GenerationFailed { answer: Answer, error: LlmError },
}

impl Resolution {
    pub fn answer(&self) -> &Answer {
        match self {
            Resolution::Parsed(parsed) => &parsed.answer,
            Resolution::GenerationFailed { answer, .. } => answer,
        }
    }

    pub fn into_answer(self) -> Answer {
        match self {
            Resolution::Parsed(parsed) => parsed.answer,
            Resolution::GenerationFailed { answer, .. } => answer,
        }
    }

    pub fn warning(&self) -> Option<ValidationWarning> {
        match self {
            Resolution::Parsed(parsed) => parsed.warning,
            Resolution::GenerationFailed { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::GenerationFailed { .. })
    }
}

/// Parses generated text into answers shaped by the question type.
#[derive(Debug, Clone)]
pub struct AnswerValidator {
    rating: RatingScale,
    no_answer_text: String,
}

impl AnswerValidator {
    pub fn new(rating: RatingScale, no_answer_text: impl Into<String>) -> Self {
        Self {
            rating,
            no_answer_text: no_answer_text.into(),
        }
    }

    pub fn rating_scale(&self) -> &RatingScale {
        &self.rating
    }

    /// Answer recorded when nothing usable was generated for `question_type`.
    pub fn fallback_answer(&self, question_type: QuestionType) -> Answer {
        match question_type {
            QuestionType::SingleChoice => Answer::Text(UNANSWERABLE_CHOICE.to_string()),
            QuestionType::MultipleChoice => Answer::Choices(Vec::new()),
            QuestionType::Rating => Answer::Rating(self.rating.fallback),
            QuestionType::Text => Answer::Text(self.no_answer_text.clone()),
        }
    }

    /// Resolve the outcome of a generation call into a recorded answer.
    pub fn resolve(&self, question: &Question, generated: LlmResult<String>) -> Resolution {
        match generated {
            Ok(raw) => Resolution::Parsed(self.parse(question, &raw)),
            Err(error) => Resolution::GenerationFailed {
                answer: self.fallback_answer(question.question_type),
                error,
            },
        }
    }

    /// Parse generated text for `question`. Never fails.
    pub fn parse(&self, question: &Question, raw: &str) -> ParsedAnswer {
        let raw = raw.trim();
        match question.question_type {
            QuestionType::SingleChoice => self.parse_single_choice(raw, &question.options),
            QuestionType::MultipleChoice => self.parse_multiple_choice(raw, &question.options),
            QuestionType::Rating => self.parse_rating(raw),
            QuestionType::Text => self.parse_text(raw),
        }
    }

    fn parse_single_choice(&self, raw: &str, options: &[String]) -> ParsedAnswer {
        if raw.is_empty() {
            return ParsedAnswer::unmatched(
                self.fallback_answer(QuestionType::SingleChoice),
                ValidationWarning::EmptyOutput,
            );
        }
        for layer in SingleChoiceLayer::ORDER {
            if let Some(option) = layer.apply(raw, options) {
                return ParsedAnswer::matched(Answer::Text(option), MatchedBy::SingleChoice(layer));
            }
        }
        ParsedAnswer::unmatched(Answer::Text(raw.to_string()), ValidationWarning::AmbiguousMatch)
    }

    fn parse_multiple_choice(&self, raw: &str, options: &[String]) -> ParsedAnswer {
        if raw.is_empty() {
            return ParsedAnswer::unmatched(
                self.fallback_answer(QuestionType::MultipleChoice),
                ValidationWarning::EmptyOutput,
            );
        }
        for layer in MultipleChoiceLayer::ORDER {
            if let Some(selected) = layer.apply(raw, options) {
                return ParsedAnswer::matched(
                    Answer::Choices(selected),
                    MatchedBy::MultipleChoice(layer),
                );
            }
        }
        ParsedAnswer::unmatched(
            Answer::Choices(vec![raw.to_string()]),
            ValidationWarning::AmbiguousMatch,
        )
    }

    fn parse_rating(&self, raw: &str) -> ParsedAnswer {
        match first_digit_run(raw) {
            Some(value) => {
                ParsedAnswer::matched(Answer::Rating(self.rating.clamp(value)), MatchedBy::DigitRun)
            }
            None => ParsedAnswer::unmatched(
                Answer::Rating(self.rating.fallback),
                ValidationWarning::UnparseableRating,
            ),
        }
    }

    fn parse_text(&self, raw: &str) -> ParsedAnswer {
        if raw.is_empty() {
            ParsedAnswer::unmatched(
                Answer::Text(self.no_answer_text.clone()),
                ValidationWarning::EmptyOutput,
            )
        } else {
            ParsedAnswer::matched(Answer::Text(raw.to_string()), MatchedBy::Trimmed)
        }
    }
}
