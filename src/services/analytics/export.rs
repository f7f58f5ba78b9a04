//! Export Functionality
//!
//! JSON export of a survey with its responses and computed analytics.

use chrono::{DateTime, Utc};
use persona_survey_core::{Response, Survey};
use serde::Serialize;

use crate::models::analytics::SurveyAnalytics;
use crate::utils::error::AppResult;

use super::service::AnalyticsEngine;

/// Header of an export document
#[derive(Debug, Clone, Serialize)]
pub struct ExportInfo {
    pub survey_id: String,
    pub survey_title: String,
    pub export_time: DateTime<Utc>,
    pub total_responses: usize,
    pub completed_responses: usize,
}

/// A complete survey export
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument<'a> {
    pub export_info: ExportInfo,
    pub survey: &'a Survey,
    pub responses: Vec<&'a Response>,
    pub analytics: SurveyAnalytics,
}

impl AnalyticsEngine {
    /// Assemble the export document for `survey`.
    pub fn export_document<'a>(
        &self,
        survey: &'a Survey,
        responses: &'a [Response],
    ) -> ExportDocument<'a> {
        let analytics = self.analyze(survey, responses);
        let responses: Vec<&Response> = responses
            .iter()
            .filter(|r| r.survey_id == survey.id)
            .collect();

        ExportDocument {
            export_info: ExportInfo {
                survey_id: survey.id.clone(),
                survey_title: survey.title.clone(),
                export_time: Utc::now(),
                total_responses: analytics.summary.total_responses,
                completed_responses: analytics.summary.completed_responses,
            },
            survey,
            responses,
            analytics,
        }
    }

    /// Pretty-printed JSON export.
    pub fn export_json(&self, survey: &Survey, responses: &[Response]) -> AppResult<String> {
        let document = self.export_document(survey, responses);
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Suggested file name, e.g. `survey_<id>_20260101_120000.json`
    pub fn export_filename(survey_id: &str) -> String {
        format!(
            "survey_{}_{}.json",
            survey_id,
            Utc::now().format("%Y%m%d_%H%M%S")
        )
    }
}
