//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.
//! Everything lives under ~/.persona-survey/ unless configured otherwise.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the application directory (~/.persona-survey/)
pub fn app_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".persona-survey"))
}

/// Get the config file path (~/.persona-survey/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("config.json"))
}

/// Get the default data directory (~/.persona-survey/data/)
pub fn data_dir() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("data"))
}

/// Get the default persona directory (~/.persona-survey/agents/)
pub fn personas_dir() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("agents"))
}

/// Get the default prompt template directory (~/.persona-survey/prompts/)
pub fn prompts_dir() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("prompts"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
