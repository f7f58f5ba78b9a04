//! In-Memory Store
//!
//! `SurveyStore` kept entirely in process. Used by tests and dry runs.

use std::collections::HashMap;

use async_trait::async_trait;
use persona_survey_core::{Response, Survey};
use tokio::sync::RwLock;

use super::store::{sort_responses, sort_surveys, SurveyStore};
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    surveys: RwLock<HashMap<String, Survey>>,
    responses: RwLock<HashMap<String, Response>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SurveyStore for MemoryStore {
    async fn save_survey(&self, survey: &Survey) -> AppResult<()> {
        survey.validate()?;
        self.surveys
            .write()
            .await
            .insert(survey.id.clone(), survey.clone());
        Ok(())
    }

    async fn load_survey(&self, survey_id: &str) -> AppResult<Option<Survey>> {
        Ok(self.surveys.read().await.get(survey_id).cloned())
    }

    async fn list_surveys(&self) -> AppResult<Vec<Survey>> {
        let mut surveys: Vec<Survey> = self.surveys.read().await.values().cloned().collect();
        sort_surveys(&mut surveys);
        Ok(surveys)
    }

    async fn delete_survey(&self, survey_id: &str) -> AppResult<bool> {
        let existed = self.surveys.write().await.remove(survey_id).is_some();
        self.responses
            .write()
            .await
            .retain(|_, r| r.survey_id != survey_id);
        Ok(existed)
    }

    async fn save_response(&self, response: &Response) -> AppResult<()> {
        let mut responses = self.responses.write().await;
        if responses.get(&response.id).is_some_and(Response::is_completed) {
            return Err(AppError::validation(format!(
                "Response {} is already completed",
                response.id
            )));
        }
        responses.insert(response.id.clone(), response.clone());
        Ok(())
    }

    async fn list_responses(&self, survey_id: &str) -> AppResult<Vec<Response>> {
        let mut responses: Vec<Response> = self
            .responses
            .read()
            .await
            .values()
            .filter(|r| r.survey_id == survey_id)
            .cloned()
            .collect();
        sort_responses(&mut responses);
        Ok(responses)
    }
}
