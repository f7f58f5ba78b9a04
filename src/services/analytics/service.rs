//! Analytics Engine
//!
//! Aggregates the completed responses of a survey into per-question
//! statistics plus a response summary.

use persona_survey_core::{Answer, QuestionType, RatingScale, Response, Survey};

use super::aggregation::{
    aggregate_multiple_choice, aggregate_rating, aggregate_single_choice, aggregate_text,
};
use crate::models::analytics::{
    QuestionAnalytics, QuestionStats, ResponseSummary, SurveyAnalytics, SurveyStats,
};

/// Survey analytics over a fixed rating scale.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    rating: RatingScale,
}

impl AnalyticsEngine {
    pub fn new(rating: RatingScale) -> Self {
        Self { rating }
    }

    /// Analyze `responses` for `survey`.
    ///
    /// Responses for other surveys are ignored. Only completed responses
    /// contribute to question statistics; all of them count toward the
    /// summary. The result does not depend on response order.
    pub fn analyze(&self, survey: &Survey, responses: &[Response]) -> SurveyAnalytics {
        let responses: Vec<&Response> = responses
            .iter()
            .filter(|r| r.survey_id == survey.id)
            .collect();
        let completed: Vec<&Response> = responses
            .iter()
            .copied()
            .filter(|r| r.is_completed())
            .collect();

        let questions = survey
            .questions
            .iter()
            .map(|question| {
                let answers: Vec<&Answer> = completed
                    .iter()
                    .filter_map(|r| r.answer(question.id))
                    .collect();

                let stats = match question.question_type {
                    QuestionType::SingleChoice => QuestionStats::SingleChoice(
                        aggregate_single_choice(&answers, &question.options),
                    ),
                    QuestionType::MultipleChoice => QuestionStats::MultipleChoice(
                        aggregate_multiple_choice(&answers, &question.options),
                    ),
                    QuestionType::Rating => {
                        QuestionStats::Rating(aggregate_rating(&answers, &self.rating))
                    }
                    QuestionType::Text => QuestionStats::Text(aggregate_text(&answers)),
                };

                QuestionAnalytics {
                    question_id: question.id,
                    question_text: question.text.clone(),
                    stats,
                }
            })
            .collect();

        tracing::debug!(
            survey_id = %survey.id,
            responses = responses.len(),
            completed = completed.len(),
            "survey analyzed"
        );

        SurveyAnalytics {
            survey_id: survey.id.clone(),
            title: survey.title.clone(),
            question_count: survey.questions.len(),
            summary: ResponseSummary::new(responses.len(), completed.len()),
            questions,
        }
    }

    /// Overview counts for a survey and its responses.
    pub fn stats(survey: &Survey, responses: &[Response]) -> SurveyStats {
        let responses: Vec<&Response> = responses
            .iter()
            .filter(|r| r.survey_id == survey.id)
            .collect();
        let completed = responses.iter().filter(|r| r.is_completed()).count();
        let summary = ResponseSummary::new(responses.len(), completed);

        SurveyStats {
            survey_id: survey.id.clone(),
            title: survey.title.clone(),
            question_count: survey.questions.len(),
            total_responses: summary.total_responses,
            completed_responses: summary.completed_responses,
            completion_rate: summary.completion_rate,
            created_at: survey.created_at,
        }
    }
}
