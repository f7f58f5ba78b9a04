//! Analytics Commands
//!
//! Per-question statistics and JSON export for stored surveys.

use std::path::{Path, PathBuf};

use crate::models::analytics::SurveyAnalytics;
use crate::services::analytics::AnalyticsEngine;
use crate::state::AppState;
use crate::storage::SurveyStore;
use crate::utils::error::AppResult;

pub async fn analyze_survey(state: &AppState, survey_id: &str) -> AppResult<SurveyAnalytics> {
    let store = state.store().await?;
    let survey = store.require_survey(survey_id).await?;
    let responses = store.list_responses(survey_id).await?;
    Ok(state.analytics().analyze(&survey, &responses))
}

/// Write the export document and return the path written.
///
/// Without `out` the file lands in the current directory under a
/// timestamped name.
pub async fn export_survey(
    state: &AppState,
    survey_id: &str,
    out: Option<&Path>,
) -> AppResult<PathBuf> {
    let store = state.store().await?;
    let survey = store.require_survey(survey_id).await?;
    let responses = store.list_responses(survey_id).await?;
    let content = state.analytics().export_json(&survey, &responses)?;

    let path = match out {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(AnalyticsEngine::export_filename(survey_id)),
    };
    tokio::fs::write(&path, content).await?;
    tracing::info!(survey_id, path = %path.display(), responses = responses.len(), "survey exported");
    Ok(path)
}
