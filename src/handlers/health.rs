//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    environment: String,
    model: String,
    estimator: String,
    languages: usize,
    vocabulary_size: usize,
    loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Liveness message
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "MuseumLangAPI is running.",
    })
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let info = state.classifier.info();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        environment: state.config.environment.clone(),
        model: info.name,
        estimator: info.estimator,
        languages: info.languages.len(),
        vocabulary_size: info.vocabulary_size,
        loaded_at: info.loaded_at,
    })
}
