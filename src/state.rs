//! Application State
//!
//! Configuration plus the services built from it, shared by every command.

use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use persona_survey_llm::{OllamaGenerator, TextGenerator};

use crate::models::settings::AppConfig;
use crate::services::analytics::AnalyticsEngine;
use crate::services::filler::SurveyFiller;
use crate::services::persona::PersonaContext;
use crate::storage::{ConfigService, JsonFileStore, SurveyStore};
use crate::utils::error::{AppError, AppResult};

/// Services for one CLI invocation. The store is opened on first use.
pub struct AppState {
    /// Configuration service for app settings
    config: ConfigService,
    /// JSON file store under `data_dir`
    store: RwLock<Option<Arc<JsonFileStore>>>,
}

impl AppState {
    pub fn new(config: ConfigService) -> Self {
        Self {
            config,
            store: RwLock::new(None),
        }
    }

    /// Load configuration from `path`, or the default location.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config = match path {
            Some(path) => ConfigService::load_or_default(path)?,
            None => ConfigService::new()?,
        };
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &AppConfig {
        self.config.get_config()
    }

    pub fn config_service(&self) -> &ConfigService {
        &self.config
    }

    pub fn config_service_mut(&mut self) -> &mut ConfigService {
        &mut self.config
    }

    /// Get the survey store, opening it on first call
    pub async fn store(&self) -> AppResult<Arc<JsonFileStore>> {
        if let Some(store) = self.store.read().await.as_ref() {
            return Ok(store.clone());
        }

        let mut guard = self.store.write().await;
        if let Some(store) = guard.as_ref() {
            return Ok(store.clone());
        }
        let store = Arc::new(JsonFileStore::open(&self.config().data_dir).await?);
        *guard = Some(store.clone());
        Ok(store)
    }

    /// The configured generation backend
    pub fn generator(&self) -> AppResult<Arc<dyn TextGenerator>> {
        let generator = OllamaGenerator::new(self.config().generation.clone())
            .map_err(|e| AppError::config(format!("Cannot create generation client: {}", e)))?;
        Ok(Arc::new(generator))
    }

    /// Personas and activity history from the configured locations
    pub fn persona_context(&self) -> AppResult<PersonaContext> {
        let config = self.config();
        PersonaContext::load(
            &config.personas_dir,
            config.activity_log.as_deref(),
            config.history_lines,
        )
    }

    /// A filler wired to the configured backend, personas and store
    pub async fn filler(&self) -> AppResult<SurveyFiller> {
        let context = Arc::new(self.persona_context()?);
        let store: Arc<dyn SurveyStore> = self.store().await?;
        SurveyFiller::from_config(self.config(), context, self.generator()?, store)
    }

    pub fn analytics(&self) -> AnalyticsEngine {
        AnalyticsEngine::new(self.config().rating)
    }
}
