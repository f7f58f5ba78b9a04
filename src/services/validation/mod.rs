//! Answer Validation
//!
//! Layered parsing of generated text into typed answers, plus the fallback
//! answers used when generation fails.

pub mod layers;
pub mod validator;

pub use layers::{MultipleChoiceLayer, SingleChoiceLayer};
pub use validator::{
    AnswerValidator, MatchedBy, ParsedAnswer, Resolution, ValidationWarning, UNANSWERABLE_CHOICE,
};
