//! Pipeline engine - artifact loaded into a ready-to-run classifier

use std::path::Path;

use chrono::{DateTime, Utc};

use super::artifact::{load_artifact, validate_artifact, PipelineArtifact};
use super::estimator::{argmax, Estimator};
use super::vectorizer::Vectorizer;
use super::{LanguageClassifier, ModelError, ModelInfo, Prediction};

/// Immutable vectorizer + estimator pair
pub struct PipelineClassifier {
    name: String,
    classes: Vec<String>,
    vectorizer: Vectorizer,
    estimator: Estimator,
    loaded_at: DateTime<Utc>,
}

impl PipelineClassifier {
    /// Load artifact from disk. Any failure here means the service must not start.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        tracing::info!("Loading language detection pipeline from: {}", path.display());

        let artifact = load_artifact(path)?;
        let classifier = Self::from_artifact(artifact)?;

        tracing::info!(
            model = %classifier.name,
            estimator = classifier.estimator.kind(),
            languages = classifier.classes.len(),
            vocabulary = classifier.vectorizer.vocabulary_size(),
            "Language detection pipeline loaded"
        );

        Ok(classifier)
    }

    pub fn from_artifact(artifact: PipelineArtifact) -> Result<Self, ModelError> {
        validate_artifact(&artifact)?;

        let PipelineArtifact { name, classes, vectorizer, estimator, .. } = artifact;
        let n_classes = classes.len();

        Ok(Self {
            name: name.unwrap_or_else(|| "language_detection_pipeline".to_string()),
            classes,
            vectorizer: Vectorizer::new(vectorizer),
            estimator: Estimator::new(estimator, n_classes),
            loaded_at: Utc::now(),
        })
    }
}

impl LanguageClassifier for PipelineClassifier {
    fn predict(&self, text: &str) -> Result<Prediction, ModelError> {
        let features = self.vectorizer.transform(text);

        // No probability model: decision function label, full confidence
        let (index, confidence) = match self.estimator.predict_proba(&features)? {
            Some(proba) => {
                let index = argmax(&proba)
                    .ok_or_else(|| ModelError::Inference("empty probability vector".to_string()))?;
                (index, proba[index])
            }
            None => (self.estimator.predict_index(&features)?, 1.0),
        };

        if !(0.0..=1.0).contains(&confidence) {
            return Err(ModelError::Inference(format!("confidence out of range: {}", confidence)));
        }

        let label = self
            .classes
            .get(index)
            .cloned()
            .ok_or_else(|| ModelError::Inference(format!("class index {} out of range", index)))?;

        Ok(Prediction { label, confidence })
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            name: self.name.clone(),
            estimator: self.estimator.kind().to_string(),
            languages: self.classes.clone(),
            vocabulary_size: self.vectorizer.vocabulary_size(),
            loaded_at: self.loaded_at,
        }
    }
}
