//! Survey Commands
//!
//! Import, list, copy and delete stored surveys.

use std::path::Path;

use persona_survey_core::Survey;

use crate::models::analytics::SurveyStats;
use crate::services::analytics::AnalyticsEngine;
use crate::services::import::import_survey_file;
use crate::state::AppState;
use crate::storage::SurveyStore;
use crate::utils::error::{AppError, AppResult};

/// Import a survey document and store it under a fresh id
pub async fn import_survey(state: &AppState, file: &Path) -> AppResult<Survey> {
    let survey = import_survey_file(file)?;
    state.store().await?.save_survey(&survey).await?;
    Ok(survey)
}

/// Overview of every stored survey, newest first
pub async fn list_surveys(state: &AppState) -> AppResult<Vec<SurveyStats>> {
    let store = state.store().await?;
    let mut stats = Vec::new();
    for survey in store.list_surveys().await? {
        let responses = store.list_responses(&survey.id).await?;
        stats.push(AnalyticsEngine::stats(&survey, &responses));
    }
    Ok(stats)
}

pub async fn survey_stats(state: &AppState, survey_id: &str) -> AppResult<SurveyStats> {
    state.store().await?.survey_stats(survey_id).await
}

pub async fn duplicate_survey(
    state: &AppState,
    survey_id: &str,
    title: Option<&str>,
) -> AppResult<Survey> {
    state
        .store()
        .await?
        .duplicate_survey(survey_id, title)
        .await
}

/// Delete a survey with its responses; unknown ids are `NotFound`
pub async fn delete_survey(state: &AppState, survey_id: &str) -> AppResult<()> {
    if state.store().await?.delete_survey(survey_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found(format!("Survey {}", survey_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ConfigService;

    fn state_in(dir: &Path) -> AppState {
        let mut config = ConfigService::load_or_default(&dir.join("config.json")).unwrap();
        config.get_config_mut().data_dir = dir.join("data");
        AppState::new(config)
    }

    fn write_document(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("survey.json");
        std::fs::write(
            &path,
            r#"{
                "title": "社區滿意度",
                "questions": [
                    {"type": "rating", "text": "整體滿意度？"},
                    {"type": "radio", "text": "最常去哪裡？", "options": ["咖啡廳", "公園"]}
                ]
            }"#,
        )
        .unwrap();
        path
    }

    #[tokio::test]
    async fn test_import_then_list() {
        let temp = tempfile::tempdir().unwrap();
        let state = state_in(temp.path());

        let survey = import_survey(&state, &write_document(temp.path()))
            .await
            .unwrap();
        assert_eq!(survey.questions.len(), 2);

        let listed = list_surveys(&state).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].survey_id, survey.id);
        assert_eq!(listed[0].total_responses, 0);
        assert_eq!(listed[0].completion_rate, 0.0);
    }

    #[tokio::test]
    async fn test_duplicate_and_delete() {
        let temp = tempfile::tempdir().unwrap();
        let state = state_in(temp.path());
        let survey = import_survey(&state, &write_document(temp.path()))
            .await
            .unwrap();

        let copy = duplicate_survey(&state, &survey.id, Some("第二輪"))
            .await
            .unwrap();
        assert_eq!(copy.title, "第二輪");
        assert_eq!(copy.questions, survey.questions);

        delete_survey(&state, &survey.id).await.unwrap();
        assert!(matches!(
            delete_survey(&state, &survey.id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(list_surveys(&state).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stats_unknown_survey() {
        let temp = tempfile::tempdir().unwrap();
        let state = state_in(temp.path());
        assert!(matches!(
            survey_stats(&state, "missing").await,
            Err(AppError::NotFound(_))
        ));
    }
}
