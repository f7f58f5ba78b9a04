//! Survey Filler
//!
//! Batch driver that runs the answer pipeline for every persona.

mod report;
mod service;

pub use report::{BatchReport, PersonaOutcome, QuestionWarning};
pub use service::SurveyFiller;
