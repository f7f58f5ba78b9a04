//! Core Error Types
//!
//! Defines the foundational error types used across the Persona Survey workspace.
//! These error types only depend on thiserror + std + serde_json to keep the core
//! crate lightweight.
//!
//! The application crate extends these with variants for templates, storage and
//! batch reporting.

use thiserror::Error;

/// Core error type for the Persona Survey workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors (broken survey or response invariants)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// An answer was recorded twice for the same question
    #[error("Question {question_id} already has a recorded answer")]
    DuplicateAnswer { question_id: u32 },

    /// An answer references a question the survey does not define
    #[error("Question {question_id} does not exist in survey {survey_id}")]
    UnknownQuestion { survey_id: String, question_id: u32 },

    /// A response was completed while questions were still unanswered
    #[error("Response is incomplete, unanswered questions: {missing:?}")]
    Incomplete { missing: Vec<u32> },
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
