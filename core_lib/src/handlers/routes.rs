//! HTTP route table

use crate::{
    handlers::{health::handle_health, templates},
    models::request::ApiResponse,
    AppState,
};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route(
            "/api/templates/generate",
            post(templates::handle_generate_template)
                .fallback(templates::handle_method_not_allowed),
        )
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "endpoints": {
            "health": "/health",
            "generate": "/api/templates/generate"
        }
    })))
}
