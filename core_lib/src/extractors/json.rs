//! JSON extractor that reports rejections in the API error envelope

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::models::request::ApiResponse;

/// Like [`axum::Json`], but rejections become a 400 with the same
/// `{"success":false,"message":...}` body the rest of the API uses instead
/// of axum's plain-text defaults.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::warn!("rejected request body: {}", rejection);
                let body = Json(ApiResponse::<()>::error("Invalid JSON structure".to_string()));
                Err((StatusCode::BAD_REQUEST, body).into_response())
            }
        }
    }
}
