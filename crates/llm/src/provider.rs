//! Text Generator Trait
//!
//! Defines the common interface for generation backends.

use async_trait::async_trait;

use super::types::{LlmError, LlmResult};

/// Trait that all generation backends must implement.
///
/// A backend turns one rendered prompt into one piece of raw text. It makes
/// exactly one attempt per call and never retries; a failed call surfaces as
/// an `LlmError` and the caller decides what to substitute.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the backend name for identification.
    fn name(&self) -> &'static str;

    /// Returns the model being used.
    fn model(&self) -> &str;

    /// Generate raw text for a rendered prompt.
    async fn generate(&self, prompt: &str) -> LlmResult<String>;

    /// Check if the backend is reachable.
    async fn health_check(&self) -> LlmResult<()> {
        Ok(())
    }
}

/// Helper function to classify non-success HTTP status codes
pub fn parse_http_error(status: u16, body: &str, backend: &str) -> LlmError {
    match status {
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("{} HTTP {}: {}", backend, status, body),
        },
    }
}

/// Map a transport-level reqwest error into an `LlmError`.
pub fn from_transport_error(err: reqwest::Error, timeout_secs: u64) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout {
            seconds: timeout_secs,
        }
    } else if err.is_decode() {
        LlmError::ParseError {
            message: err.to_string(),
        }
    } else {
        LlmError::NetworkError {
            message: err.to_string(),
        }
    }
}
