//! AI template generation handler

use crate::{
    error::{AppError, Result},
    extractors::json::ApiJson,
    models::templates::GenerateTemplateRequest,
    AppState,
};
use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

pub async fn handle_generate_template(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<GenerateTemplateRequest>,
) -> Result<impl IntoResponse> {
    info!(
        "POST /api/templates/generate - scenario: {:?}, landing_page: {}",
        payload.scenario, payload.include_landing_page
    );

    if payload.scenario.trim().is_empty() {
        return Err(AppError::BadRequest("Scenario is required".to_string()));
    }

    let template = state.generator.generate(&payload).await?;

    Ok(Json(template))
}

/// Fallback for non-POST methods on the generate route. Runs before any
/// body decoding or subprocess work.
pub async fn handle_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
