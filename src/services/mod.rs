//! Services
//!
//! Business logic services for the application.
//! Services implement the answer pipeline and are called by the CLI.

pub mod analytics;
pub mod filler;
pub mod import;
pub mod persona;
pub mod prompt;
pub mod validation;

pub use analytics::AnalyticsEngine;
pub use filler::{BatchReport, PersonaOutcome, SurveyFiller};
pub use persona::PersonaContext;
pub use prompt::{PromptBuilder, PromptTemplates};
pub use validation::{AnswerValidator, Resolution, ValidationWarning};
