//! Initialization Commands
//!
//! Writes the config file, the built-in prompt templates and the data
//! directories a first run needs.

use crate::models::response::InitResult;
use crate::services::prompt::PromptTemplates;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_dir;

/// Initialize configuration and templates.
///
/// Templates go to the configured `prompts_dir`, or `prompts/` next to the
/// config file, which is then recorded in the saved config. An existing
/// config file is only replaced with `force`.
pub fn init_config(state: &mut AppState, force: bool) -> AppResult<InitResult> {
    let config_path = state.config_service().path().to_path_buf();
    if config_path.exists() && !force {
        return Err(AppError::validation(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    let mut config = state.config().clone();
    let prompts_dir = match &config.prompts_dir {
        Some(dir) => dir.clone(),
        None => config_path
            .parent()
            .map(|parent| parent.join("prompts"))
            .ok_or_else(|| AppError::config("Config path has no parent directory"))?,
    };

    ensure_dir(&config.personas_dir)?;
    ensure_dir(&config.data_dir)?;
    let templates = PromptTemplates::builtin().write_to_dir(&prompts_dir)?;

    config.prompts_dir = Some(prompts_dir.clone());
    state.config_service_mut().update_config(config)?;
    tracing::info!(path = %config_path.display(), templates = templates.len(), "initialized");

    let config = state.config();
    Ok(InitResult {
        config_path,
        personas_dir: config.personas_dir.clone(),
        data_dir: config.data_dir.clone(),
        prompts_dir,
        templates,
    })
}
