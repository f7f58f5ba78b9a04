//! Health Check Commands
//!
//! Checks that the generation backend is reachable.

use persona_survey_llm::TextGenerator;

use crate::models::response::HealthResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Get the health status of the configured generation backend
pub async fn check_health(state: &AppState) -> AppResult<HealthResponse> {
    let generator = state.generator()?;
    Ok(probe(generator.as_ref(), &state.config().generation.base_url).await)
}

pub(crate) async fn probe(generator: &dyn TextGenerator, base_url: &str) -> HealthResponse {
    let mut health = HealthResponse::new(generator.name(), base_url, generator.model());

    match generator.health_check().await {
        Ok(()) => {
            health.reachable = true;
            health.status = "healthy".to_string();
        }
        Err(e) => {
            tracing::warn!(backend = generator.name(), error = %e, "generation backend unreachable");
            health.error = Some(e.to_string());
            health.status = "unreachable".to_string();
        }
    }
    health
}
