//! MuseumLang API Server
//!
//! Automatic language identification for museum texts.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    MUSEUMLANG API                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────────────┐        ┌────────────────────────┐  │
//! │  │  Endpoint Layer  │        │  Model Host            │  │
//! │  │  (Axum)          │ ─────► │  vectorizer+estimator  │  │
//! │  │  validate → map  │ ◄───── │  (Arc, read-only)      │  │
//! │  └──────────────────┘        └───────────┬────────────┘  │
//! │                                          ▼               │
//! │                       language_detection_pipeline.json   │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod classifier;
mod config;
mod error;
mod handlers;
mod models;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use classifier::{LanguageClassifier, PipelineClassifier};
use config::LogFormat;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    init_tracing(&config)?;

    tracing::info!("MuseumLang API starting ({})...", config.environment);
    if !config.is_production() {
        tracing::debug!(?config, "Loaded configuration");
    }

    // No model, no traffic
    let classifier = load_classifier(&config.model_path)?;

    // Build application state
    let state = AppState {
        classifier,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn LanguageClassifier>,
    pub config: config::Config,
}

fn init_tracing(config: &config::Config) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "museumlang_api=debug,tower_http=debug".into());

    let stdout_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer().boxed(),
    };

    // Audit trail on disk, appended across restarts
    let file_layer = match &config.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(())
}

fn load_classifier(path: &Path) -> anyhow::Result<Arc<dyn LanguageClassifier>> {
    match PipelineClassifier::load(path) {
        Ok(classifier) => Ok(Arc::new(classifier)),
        Err(e) => {
            tracing::error!("[Init] Failed to load model: {}", e);
            Err(anyhow::Error::new(e)
                .context(format!("cannot load language model from {}", path.display())))
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/openapi.json", get(handlers::docs::openapi))
        .route("/identify-language", post(handlers::language::identify))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
