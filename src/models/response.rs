//! Response Types
//!
//! Result envelopes printed by the CLI in JSON output mode.

use std::path::PathBuf;

use serde::Serialize;

use crate::utils::error::AppError;

/// Envelope for every command result in JSON output mode
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResponse<T> {
    /// Create a successful response with data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response with message
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> From<Result<T, AppError>> for CommandResponse<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// What `init` wrote to disk
#[derive(Debug, Clone, Serialize)]
pub struct InitResult {
    pub config_path: PathBuf,
    pub personas_dir: PathBuf,
    pub data_dir: PathBuf,
    pub prompts_dir: PathBuf,
    /// Template files written
    pub templates: Vec<PathBuf>,
}

/// Generation backend health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub base_url: String,
    pub model: String,
    pub reachable: bool,
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn new(backend: &str, base_url: &str, model: &str) -> Self {
        Self {
            status: "unknown".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            backend: backend.to_string(),
            base_url: base_url.to_string(),
            model: model.to_string(),
            reachable: false,
            error: None,
        }
    }
}
