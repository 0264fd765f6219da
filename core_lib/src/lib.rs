//! Core library containing business logic and route handlers for the
//! phishing template generation server.

pub mod config;
pub mod error;
pub mod extractors;
pub mod generator;
pub mod handlers;
pub mod middleware;
pub mod models;

pub use config::{AppConfig, CorsConfig, ServerConfig};
pub use error::{AppError, Result};
pub use generator::{GeneratorConfig, GeneratorError, TemplateGenerator};
pub use handlers::create_routes;
pub use models::templates::{GenerateTemplateRequest, GeneratedTemplate};

use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub generator: TemplateGenerator,
}

impl AppState {
    pub fn new(generator: TemplateGenerator) -> Self {
        Self {
            app_name: "Phishing Template Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generator,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TemplateGenerator::new(GeneratorConfig::default()))
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: AppConfig) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(middleware::cors::cors_layer_from_config(&config.cors))
        .layer(middleware::logging::logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
