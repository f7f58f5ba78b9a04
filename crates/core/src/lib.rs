//! Persona Survey Core
//!
//! Data model and error types for the Persona Survey workspace. This crate has
//! no dependency on the generation backend, storage or CLI.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `survey` - Surveys and questions (`Survey`, `Question`, `QuestionType`)
//! - `response` - Responses and typed answers (`Response`, `Answer`)
//! - `persona` - Simulated respondents (`Persona`)
//! - `rating` - The configurable rating domain (`RatingScale`)

pub mod error;
pub mod persona;
pub mod rating;
pub mod response;
pub mod survey;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Data Model ─────────────────────────────────────────────────────────
pub use persona::Persona;
pub use rating::RatingScale;
pub use response::{Answer, Response};
pub use survey::{Question, QuestionType, Survey};
