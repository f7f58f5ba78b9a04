//! Generation Types
//!
//! Configuration, wire types and errors for text-generation calls.

use serde::{Deserialize, Serialize};

/// Default Ollama API endpoint
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

/// Default model tag
pub const DEFAULT_MODEL: &str = "qwen3:14b";

/// Connection and sampling configuration for the generation backend.
///
/// Sampling parameters are fixed per run; individual calls never override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the generation server
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name to use
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Nucleus-sampling threshold
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Maximum number of tokens to generate
    #[serde(default = "default_num_predict")]
    pub num_predict: i32,
    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

fn default_num_predict() -> i32 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            num_predict: default_num_predict(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GenerationConfig {
    /// Check the configuration for values that can never produce a call.
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("generation.model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("generation.timeout_secs must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(format!("generation.top_p {} is outside 0..=1", self.top_p));
        }
        if self.temperature < 0.0 {
            return Err(format!(
                "generation.temperature {} must not be negative",
                self.temperature
            ));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("generation.base_url {:?} is invalid: {}", self.base_url, e))?;
        Ok(())
    }
}

/// Sampling options sent with each request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub num_predict: i32,
}

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: GenerateOptions,
}

impl GenerateRequest {
    /// Build a non-streaming request for `prompt` using the configured sampling.
    pub fn new(config: &GenerationConfig, prompt: impl Into<String>) -> Self {
        Self {
            model: config.model.clone(),
            prompt: prompt.into(),
            stream: false,
            options: GenerateOptions {
                temperature: config.temperature,
                top_p: config.top_p,
                num_predict: config.num_predict,
            },
        }
    }
}

/// Successful body of `POST /api/generate`. Other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
}

/// Failure of a single generation call.
///
/// Every variant means the backend could not produce text for this call;
/// callers substitute a fallback answer instead of propagating.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmError {
    /// The call did not finish within the configured timeout
    Timeout { seconds: u64 },
    /// Network/connection error
    NetworkError { message: String },
    /// Server error from the backend
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Model not found or not pulled
    ModelNotFound { model: String },
    /// Invalid request (bad parameters, bad URL)
    InvalidRequest { message: String },
    /// Response parsing error
    ParseError { message: String },
    /// Other error
    Other { message: String },
}

impl LlmError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, LlmError::Timeout { .. })
    }
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::Timeout { seconds } => {
                write!(f, "Generation timed out after {}s", seconds)
            }
            LlmError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            LlmError::ServerError { message, status } => {
                if let Some(s) = status {
                    write!(f, "Server error ({}): {}", s, message)
                } else {
                    write!(f, "Server error: {}", message)
                }
            }
            LlmError::ModelNotFound { model } => {
                write!(f, "Model not found: {}", model)
            }
            LlmError::InvalidRequest { message } => {
                write!(f, "Invalid request: {}", message)
            }
            LlmError::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            LlmError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for LlmError {}

/// Result type for generation operations
pub type LlmResult<T> = Result<T, LlmError>;
