//! Shared test fixtures.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use persona_survey::models::settings::AppConfig;
use persona_survey::services::persona::PersonaContext;
use persona_survey::storage::{MemoryStore, SurveyStore};
use persona_survey::utils::error::{AppError, AppResult};
use persona_survey::SurveyFiller;
use persona_survey_core::{Persona, Response, Survey};
use persona_survey_llm::{LlmError, LlmResult, TextGenerator};

/// Replies per persona, picked by finding the persona's name in the prompt.
///
/// Each persona has a queue consumed one call at a time; an exhausted queue
/// yields an empty string.
#[derive(Default)]
pub struct ScriptedGenerator {
    scripts: Mutex<HashMap<String, VecDeque<LlmResult<String>>>>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, persona: &str, text: &str) -> Self {
        self.push(persona, Ok(text.to_string()))
    }

    pub fn time_out(self, persona: &str) -> Self {
        self.push(persona, Err(LlmError::Timeout { seconds: 30 }))
    }

    pub fn delay(mut self, persona: &str, millis: u64) -> Self {
        self.delays
            .insert(persona.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(self, persona: &str, reply: LlmResult<String>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(persona.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    fn persona_in(&self, prompt: &str) -> Option<String> {
        let scripts = self.scripts.lock().unwrap();
        scripts
            .keys()
            .chain(self.delays.keys())
            .find(|name| prompt.contains(name.as_str()))
            .cloned()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> LlmResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Some(persona) = self.persona_in(prompt) else {
            return Ok(String::new());
        };

        if let Some(delay) = self.delays.get(&persona) {
            tokio::time::sleep(*delay).await;
        }

        let reply = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&persona)
            .and_then(VecDeque::pop_front);
        reply.unwrap_or_else(|| Ok(String::new()))
    }
}

/// A store whose response writes always fail.
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

#[async_trait]
impl SurveyStore for ReadOnlyStore {
    async fn save_survey(&self, survey: &Survey) -> AppResult<()> {
        self.inner.save_survey(survey).await
    }

    async fn load_survey(&self, survey_id: &str) -> AppResult<Option<Survey>> {
        self.inner.load_survey(survey_id).await
    }

    async fn list_surveys(&self) -> AppResult<Vec<Survey>> {
        self.inner.list_surveys().await
    }

    async fn delete_survey(&self, survey_id: &str) -> AppResult<bool> {
        self.inner.delete_survey(survey_id).await
    }

    async fn save_response(&self, _response: &Response) -> AppResult<()> {
        Err(AppError::storage("disk full"))
    }

    async fn list_responses(&self, survey_id: &str) -> AppResult<Vec<Response>> {
        self.inner.list_responses(survey_id).await
    }
}

pub fn personas(names: &[&str]) -> Arc<PersonaContext> {
    let personas = names.iter().map(|name| {
        let mut persona = Persona::new(*name);
        persona.age = Some(30);
        persona.personality = vec!["友善".to_string()];
        persona.interests = vec!["咖啡".to_string()];
        persona
    });
    Arc::new(PersonaContext::from_personas(personas))
}

/// A filler over the default configuration.
pub fn filler(
    names: &[&str],
    generator: Arc<ScriptedGenerator>,
    store: Arc<dyn SurveyStore>,
) -> SurveyFiller {
    SurveyFiller::from_config(&AppConfig::default(), personas(names), generator, store)
        .expect("default config builds a filler")
}
