//! Survey Filler
//!
//! Drives the answer pipeline: for each persona and each question, build the
//! prompt, call the generator once, resolve the result into an answer and
//! record it. A completed response is stored before the persona counts as
//! done.
//!
//! Personas run through a bounded pool (`max_concurrency`, 1 = sequential).
//! Questions within one persona always run in order. Outcomes come back in
//! persona order whatever the concurrency.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use persona_survey_core::{Persona, Response, Survey};
use persona_survey_llm::TextGenerator;

use super::report::{BatchReport, PersonaOutcome, QuestionWarning};
use crate::models::settings::AppConfig;
use crate::services::persona::PersonaContext;
use crate::services::prompt::{PromptBuilder, PromptTemplates};
use crate::services::validation::{AnswerValidator, Resolution, ValidationWarning};
use crate::storage::SurveyStore;
use crate::utils::error::{AppError, AppResult};

/// Fills surveys on behalf of every persona in a context
pub struct SurveyFiller {
    context: Arc<PersonaContext>,
    builder: PromptBuilder,
    validator: AnswerValidator,
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn SurveyStore>,
    max_concurrency: usize,
}

impl SurveyFiller {
    pub fn new(
        context: Arc<PersonaContext>,
        builder: PromptBuilder,
        validator: AnswerValidator,
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn SurveyStore>,
    ) -> Self {
        Self {
            context,
            builder,
            validator,
            generator,
            store,
            max_concurrency: 1,
        }
    }

    /// Wire a filler from configuration. Templates come from
    /// `config.prompts_dir` when set, otherwise the built-ins.
    pub fn from_config(
        config: &AppConfig,
        context: Arc<PersonaContext>,
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn SurveyStore>,
    ) -> AppResult<Self> {
        let templates = match &config.prompts_dir {
            Some(dir) => PromptTemplates::from_dir(dir)?,
            None => PromptTemplates::builtin(),
        };
        let builder = PromptBuilder::new(templates, config.history_chars, config.rating);
        let validator = AnswerValidator::new(config.rating, config.no_answer_text.clone());

        Ok(Self::new(context, builder, validator, generator, store)
            .with_max_concurrency(config.max_concurrency))
    }

    /// Set the number of personas filled concurrently (at least 1).
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn context(&self) -> &PersonaContext {
        &self.context
    }

    /// Fill `survey_id` for every persona in the context, in name order.
    ///
    /// Fails before any generation when the survey is unknown or a question
    /// type has no template, and afterwards only when no persona succeeded.
    pub async fn fill_all(&self, survey_id: &str) -> AppResult<BatchReport> {
        let survey = self.prepare(survey_id).await?;
        if self.context.is_empty() {
            return Err(AppError::not_found("No personas available to fill the survey"));
        }

        tracing::info!(
            survey_id,
            personas = self.context.len(),
            concurrency = self.max_concurrency,
            "filling survey"
        );

        let outcomes: Vec<PersonaOutcome> = stream::iter(self.context.iter())
            .map(|persona| self.fill_persona(&survey, persona))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let report = BatchReport {
            survey_id: survey.id.clone(),
            outcomes,
        };
        tracing::info!(
            survey_id,
            succeeded = report.succeeded(),
            failed = report.failed(),
            "survey fill finished"
        );

        if report.succeeded() == 0 {
            return Err(AppError::BatchFailed {
                attempted: report.outcomes.len(),
            });
        }
        Ok(report)
    }

    /// Fill `survey_id` for a single persona and return the stored response.
    pub async fn fill_for(&self, survey_id: &str, persona_name: &str) -> AppResult<Response> {
        let survey = self.prepare(survey_id).await?;
        let persona = self
            .context
            .get(persona_name)
            .ok_or_else(|| AppError::not_found(format!("Persona {}", persona_name)))?;

        let (response, _, _) = self.answer_all(&survey, persona).await?;
        self.store.save_response(&response).await?;
        tracing::info!(survey_id, persona = %persona.name, "response stored");
        Ok(response)
    }

    /// Load the survey and check every question type can be rendered.
    async fn prepare(&self, survey_id: &str) -> AppResult<Survey> {
        let survey = self.store.require_survey(survey_id).await?;
        survey.validate()?;
        if let Some(&missing) = self.builder.templates().missing_for(&survey).first() {
            return Err(AppError::TemplateMissing(missing));
        }
        Ok(survey)
    }

    async fn fill_persona(&self, survey: &Survey, persona: &Persona) -> PersonaOutcome {
        let mut outcome = PersonaOutcome {
            persona: persona.name.clone(),
            response: None,
            error: None,
            fallback_answers: Vec::new(),
            warnings: Vec::new(),
        };

        match self.answer_all(survey, persona).await {
            Ok((response, fallback_answers, warnings)) => {
                outcome.fallback_answers = fallback_answers;
                outcome.warnings = warnings;
                if let Err(e) = self.store.save_response(&response).await {
                    tracing::warn!(persona = %persona.name, error = %e, "failed to store response");
                    outcome.error = Some(e.to_string());
                } else {
                    tracing::info!(
                        persona = %persona.name,
                        fallbacks = outcome.fallback_answers.len(),
                        warnings = outcome.warnings.len(),
                        "response stored"
                    );
                }
                outcome.response = Some(response);
            }
            Err(e) => {
                tracing::warn!(persona = %persona.name, error = %e, "survey fill failed");
                outcome.error = Some(e.to_string());
            }
        }
        outcome
    }

    /// Answer every question in order and complete the response.
    async fn answer_all(
        &self,
        survey: &Survey,
        persona: &Persona,
    ) -> AppResult<(Response, Vec<u32>, Vec<QuestionWarning>)> {
        let mut response = Response::new(&survey.id, &persona.name);
        let mut fallback_answers = Vec::new();
        let mut warnings = Vec::new();

        for question in &survey.questions {
            let prompt = self.builder.build(persona, question)?;
            tracing::debug!(persona = %persona.name, question_id = question.id, %prompt, "prompt built");

            let generated = self.generator.generate(&prompt).await;
            if let Ok(raw) = &generated {
                tracing::debug!(persona = %persona.name, question_id = question.id, %raw, "raw generation");
            }

            let resolution = self.validator.resolve(question, generated);
            match &resolution {
                Resolution::GenerationFailed { error, .. } => {
                    tracing::warn!(
                        persona = %persona.name,
                        question_id = question.id,
                        error = %error,
                        "generation unavailable, using fallback answer"
                    );
                    fallback_answers.push(question.id);
                }
                Resolution::Parsed(parsed) => {
                    if let Some(warning) = parsed.warning {
                        log_warning(persona, question.id, warning);
                        warnings.push(QuestionWarning {
                            question_id: question.id,
                            warning,
                        });
                    }
                }
            }

            response.record_answer(question.id, resolution.into_answer())?;
        }

        response.complete(survey)?;
        Ok((response, fallback_answers, warnings))
    }
}

fn log_warning(persona: &Persona, question_id: u32, warning: ValidationWarning) {
    tracing::warn!(persona = %persona.name, question_id, %warning, "answer validation warning");
}
