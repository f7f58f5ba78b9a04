//! Fill Commands
//!
//! Runs the answer pipeline for a stored survey.

use persona_survey_core::Response;
use serde::Serialize;

use crate::services::filler::{BatchReport, SurveyFiller};
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Result of a `fill` run
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum FillResult {
    /// Every persona in the context
    Batch(BatchReport),
    /// A single named persona
    Single(Response),
}

/// Fill a survey for one persona, or for all of them.
pub async fn fill_survey(
    state: &AppState,
    survey_id: &str,
    persona: Option<&str>,
) -> AppResult<FillResult> {
    let filler = state.filler().await?;
    run_fill(&filler, survey_id, persona).await
}

pub(crate) async fn run_fill(
    filler: &SurveyFiller,
    survey_id: &str,
    persona: Option<&str>,
) -> AppResult<FillResult> {
    match persona {
        Some(name) => Ok(FillResult::Single(filler.fill_for(survey_id, name).await?)),
        None => Ok(FillResult::Batch(filler.fill_all(survey_id).await?)),
    }
}
