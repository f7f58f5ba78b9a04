//! Survey Store
//!
//! Persistence interface for surveys and responses. The answer pipeline
//! only needs `load_survey` and `save_response`; the rest backs the CLI.

use async_trait::async_trait;
use persona_survey_core::{Response, Survey};

use crate::models::analytics::SurveyStats;
use crate::services::analytics::AnalyticsEngine;
use crate::utils::error::{AppError, AppResult};

/// Storage backend for surveys and their responses
#[async_trait]
pub trait SurveyStore: Send + Sync {
    /// Insert or replace a survey
    async fn save_survey(&self, survey: &Survey) -> AppResult<()>;

    /// Load a survey by id, `None` if it does not exist
    async fn load_survey(&self, survey_id: &str) -> AppResult<Option<Survey>>;

    /// All stored surveys, newest first
    async fn list_surveys(&self) -> AppResult<Vec<Survey>>;

    /// Delete a survey and all of its responses. Returns whether the survey existed.
    async fn delete_survey(&self, survey_id: &str) -> AppResult<bool>;

    /// Insert or replace a response
    async fn save_response(&self, response: &Response) -> AppResult<()>;

    /// All responses recorded for a survey, oldest first
    async fn list_responses(&self, survey_id: &str) -> AppResult<Vec<Response>>;

    /// Load a survey or fail with `NotFound`
    async fn require_survey(&self, survey_id: &str) -> AppResult<Survey> {
        self.load_survey(survey_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Survey {}", survey_id)))
    }

    /// Overview counts for a stored survey
    async fn survey_stats(&self, survey_id: &str) -> AppResult<SurveyStats> {
        let survey = self.require_survey(survey_id).await?;
        let responses = self.list_responses(survey_id).await?;
        Ok(AnalyticsEngine::stats(&survey, &responses))
    }

    /// Store a copy of a survey under a new id and return the copy
    async fn duplicate_survey(&self, survey_id: &str, new_title: Option<&str>) -> AppResult<Survey> {
        let survey = self.require_survey(survey_id).await?;
        let copy = survey.duplicate(new_title);
        self.save_survey(&copy).await?;
        Ok(copy)
    }
}

/// Reject ids that cannot safely name a file.
pub(crate) fn check_id(kind: &str, id: &str) -> AppResult<()> {
    let valid = !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
        && !id.chars().any(char::is_control);
    if valid {
        Ok(())
    } else {
        Err(AppError::validation(format!("Invalid {} id: {:?}", kind, id)))
    }
}

/// Newest first, ties by id.
pub(crate) fn sort_surveys(surveys: &mut [Survey]) {
    surveys.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}

/// Oldest first, ties by id.
pub(crate) fn sort_responses(responses: &mut [Response]) {
    responses.sort_by(|a, b| a.started_at.cmp(&b.started_at).then(a.id.cmp(&b.id)));
}
