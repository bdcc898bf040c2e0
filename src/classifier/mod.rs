//! Classifier Module - Language identification model host
//!
//! Tách pipeline (vectorizer + estimator) khỏi HTTP layer.
//! Handlers chỉ thấy trait `LanguageClassifier`.

pub mod artifact;
pub mod engine;
pub mod estimator;
pub mod vectorizer;

#[cfg(test)]
pub mod testing;

// Re-export common types
pub use engine::PipelineClassifier;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Raw model output for one text
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Class label exactly as stored in the artifact
    pub label: String,
    /// Probability mass of the selected class, 0.0 - 1.0
    pub confidence: f64,
}

/// Loaded model summary for health/diagnostics
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub name: String,
    pub estimator: String,
    pub languages: Vec<String>,
    pub vocabulary_size: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Read-only text -> language classifier, shared across request handlers
pub trait LanguageClassifier: Send + Sync {
    fn predict(&self, text: &str) -> Result<Prediction, ModelError>;
    fn info(&self) -> ModelInfo;
}
