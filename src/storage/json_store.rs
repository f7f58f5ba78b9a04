//! JSON File Store
//!
//! One pretty-printed JSON document per survey and per response:
//!
//! ```text
//! <data_dir>/surveys/<survey_id>.json
//! <data_dir>/responses/<response_id>.json
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use persona_survey_core::{Response, Survey};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::store::{check_id, sort_responses, sort_surveys, SurveyStore};
use crate::utils::error::{AppError, AppResult};

/// File-backed survey store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    surveys_dir: PathBuf,
    responses_dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store rooted at `data_dir`.
    pub async fn open(data_dir: &Path) -> AppResult<Self> {
        let surveys_dir = data_dir.join("surveys");
        let responses_dir = data_dir.join("responses");
        tokio::fs::create_dir_all(&surveys_dir).await?;
        tokio::fs::create_dir_all(&responses_dir).await?;
        Ok(Self {
            surveys_dir,
            responses_dir,
        })
    }

    fn survey_path(&self, survey_id: &str) -> AppResult<PathBuf> {
        check_id("survey", survey_id)?;
        Ok(self.surveys_dir.join(format!("{}.json", survey_id)))
    }

    fn response_path(&self, response_id: &str) -> AppResult<PathBuf> {
        check_id("response", response_id)?;
        Ok(self.responses_dir.join(format!("{}.json", response_id)))
    }

    /// Write through a `.json.tmp` sibling and rename it into place, so a
    /// document is either absent or complete.
    async fn write_json<T: Serialize + Sync>(path: &Path, value: &T) -> AppResult<()> {
        let content = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse every `*.json` in `dir`, skipping unreadable documents.
    async fn read_all<T: DeserializeOwned>(dir: &Path) -> AppResult<Vec<T>> {
        let mut items = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read_json::<T>(&path).await {
                Ok(Some(item)) => items.push(item),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable document");
                }
            }
        }
        Ok(items)
    }
}

#[async_trait]
impl SurveyStore for JsonFileStore {
    async fn save_survey(&self, survey: &Survey) -> AppResult<()> {
        survey.validate()?;
        let path = self.survey_path(&survey.id)?;
        Self::write_json(&path, survey).await
    }

    async fn load_survey(&self, survey_id: &str) -> AppResult<Option<Survey>> {
        let path = self.survey_path(survey_id)?;
        Self::read_json(&path).await
    }

    async fn list_surveys(&self) -> AppResult<Vec<Survey>> {
        let mut surveys: Vec<Survey> = Self::read_all(&self.surveys_dir).await?;
        sort_surveys(&mut surveys);
        Ok(surveys)
    }

    async fn delete_survey(&self, survey_id: &str) -> AppResult<bool> {
        let path = self.survey_path(survey_id)?;
        let existed = match tokio::fs::remove_file(&path).await {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for response in self.list_responses(survey_id).await? {
            tokio::fs::remove_file(self.response_path(&response.id)?).await?;
            removed += 1;
        }
        tracing::info!(survey_id, existed, responses = removed, "survey deleted");
        Ok(existed)
    }

    async fn save_response(&self, response: &Response) -> AppResult<()> {
        let path = self.response_path(&response.id)?;
        if let Some(existing) = Self::read_json::<Response>(&path).await? {
            if existing.is_completed() {
                return Err(AppError::validation(format!(
                    "Response {} is already completed",
                    response.id
                )));
            }
        }
        Self::write_json(&path, response).await
    }

    async fn list_responses(&self, survey_id: &str) -> AppResult<Vec<Response>> {
        let mut responses: Vec<Response> = Self::read_all::<Response>(&self.responses_dir)
            .await?
            .into_iter()
            .filter(|r| r.survey_id == survey_id)
            .collect();
        sort_responses(&mut responses);
        Ok(responses)
    }
}
