//! Settings Models
//!
//! Application configuration and settings data structures.

use std::path::PathBuf;

use persona_survey_core::RatingScale;
use persona_survey_llm::GenerationConfig;
use serde::{Deserialize, Serialize};

use crate::utils::paths;

/// Environment variable overriding `generation.base_url`
pub const ENV_BASE_URL: &str = "OLLAMA_BASE_URL";
/// Environment variable overriding `generation.model`
pub const ENV_MODEL: &str = "OLLAMA_MODEL";

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generation backend connection and sampling
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Directory of per-persona descriptor folders
    #[serde(default = "default_personas_dir")]
    pub personas_dir: PathBuf,
    /// Optional markdown activity log
    #[serde(default)]
    pub activity_log: Option<PathBuf>,
    /// Optional directory of `survey_<type>.txt` templates; built-ins when absent
    #[serde(default)]
    pub prompts_dir: Option<PathBuf>,
    /// Root of the JSON survey/response store
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Rating domain and fallback
    #[serde(default)]
    pub rating: RatingScale,
    /// Sentinel recorded for text questions with no usable answer
    #[serde(default = "default_no_answer_text")]
    pub no_answer_text: String,
    /// Activity history truncation window, in characters
    #[serde(default = "default_history_chars")]
    pub history_chars: usize,
    /// Activity lines kept per persona from the log
    #[serde(default = "default_history_lines")]
    pub history_lines: usize,
    /// Personas filled concurrently; 1 is sequential
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_personas_dir() -> PathBuf {
    paths::personas_dir().unwrap_or_else(|_| PathBuf::from(".persona-survey/agents"))
}

fn default_data_dir() -> PathBuf {
    paths::data_dir().unwrap_or_else(|_| PathBuf::from(".persona-survey/data"))
}

fn default_no_answer_text() -> String {
    "抱歉，目前無法提供回答。".to_string()
}

fn default_history_chars() -> usize {
    1000
}

fn default_history_lines() -> usize {
    100
}

fn default_max_concurrency() -> usize {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            personas_dir: default_personas_dir(),
            activity_log: None,
            prompts_dir: None,
            data_dir: default_data_dir(),
            rating: RatingScale::default(),
            no_answer_text: default_no_answer_text(),
            history_chars: default_history_chars(),
            history_lines: default_history_lines(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl AppConfig {
    /// Apply `OLLAMA_BASE_URL` / `OLLAMA_MODEL` from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.generation.base_url = url;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
            self.generation.model = model;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.generation.validate()?;
        self.rating.validate().map_err(|e| e.to_string())?;

        if self.no_answer_text.trim().is_empty() {
            return Err("no_answer_text must not be empty".to_string());
        }

        if self.max_concurrency == 0 {
            return Err("max_concurrency must be at least 1".to_string());
        }

        if self.history_lines == 0 {
            return Err("history_lines must be at least 1".to_string());
        }

        Ok(())
    }
}
