//! Request logging middleware configuration

use http::Request;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info_span;

pub fn logging_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    impl Fn(&Request<axum::body::Body>) -> tracing::Span + Clone,
    tower_http::trace::DefaultOnRequest,
    impl Fn(&http::Response<axum::body::Body>, Duration, &tracing::Span) + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|request: &Request<axum::body::Body>| {
            info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        })
        .on_response(
            |response: &http::Response<axum::body::Body>, latency: Duration, _span: &tracing::Span| {
                let status = response.status();
                let latency_ms = latency.as_millis();

                if status.is_server_error() {
                    tracing::error!(
                        status = status.as_u16(),
                        latency_ms = latency_ms,
                        "server error response"
                    );
                } else if status.is_client_error() {
                    tracing::warn!(
                        status = status.as_u16(),
                        latency_ms = latency_ms,
                        "client error response"
                    );
                } else {
                    tracing::info!(
                        status = status.as_u16(),
                        latency_ms = latency_ms,
                        "request completed"
                    );
                }
            },
        )
}
