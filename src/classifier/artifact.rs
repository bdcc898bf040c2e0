//! Pipeline artifact - serialized vectorizer + estimator
//!
//! Load và validate artifact JSON trước khi đưa vào engine.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Supported artifact layout version
pub const FORMAT_VERSION: u32 = 1;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Complete text classification pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArtifact {
    pub format_version: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub classes: Vec<String>,
    pub vectorizer: VectorizerSpec,
    pub estimator: EstimatorSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analyzer {
    Char,
    CharWb,
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Norm {
    L1,
    L2,
}

/// Text -> sparse feature vector settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerSpec {
    pub analyzer: Analyzer,
    pub ngram_range: (usize, usize),
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    pub vocabulary: BTreeMap<String, usize>,
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Option<Norm>,
}

fn default_lowercase() -> bool {
    true
}

/// How a multiclass logistic regression turns scores into probabilities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiClass {
    /// Softmax over all class scores
    #[default]
    Multinomial,
    /// One-vs-rest: per-class sigmoids rescaled to sum to one
    Ovr,
}

/// Linear estimator weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimatorSpec {
    MultinomialNb {
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    },
    LogisticRegression {
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
        #[serde(default)]
        multi_class: MultiClass,
    },
    /// Decision function only, no probability estimates
    LinearSvc {
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
}

impl EstimatorSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            EstimatorSpec::MultinomialNb { .. } => "multinomial_nb",
            EstimatorSpec::LogisticRegression { .. } => "logistic_regression",
            EstimatorSpec::LinearSvc { .. } => "linear_svc",
        }
    }

    fn weights(&self) -> (&[Vec<f64>], &[f64]) {
        match self {
            EstimatorSpec::MultinomialNb { class_log_prior, feature_log_prob } => {
                (feature_log_prob, class_log_prior)
            }
            EstimatorSpec::LogisticRegression { coef, intercept, .. }
            | EstimatorSpec::LinearSvc { coef, intercept } => (coef, intercept),
        }
    }

    /// Width of every weight row (= number of features)
    pub fn n_features(&self) -> usize {
        self.weights().0.first().map(Vec::len).unwrap_or(0)
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Read, parse and validate an artifact file
pub fn load_artifact(path: &Path) -> Result<PipelineArtifact, ModelError> {
    if !path.exists() {
        return Err(ModelError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Model not found: {}", path.display()),
        )));
    }

    let data = fs::read(path)?;
    let artifact: PipelineArtifact = serde_json::from_slice(&data)?;

    validate_artifact(&artifact)?;

    Ok(artifact)
}

/// Structural checks so inference never indexes out of bounds
pub fn validate_artifact(artifact: &PipelineArtifact) -> Result<(), ModelError> {
    if artifact.format_version != FORMAT_VERSION {
        return Err(invalid(format!(
            "unsupported format_version {} (expected {})",
            artifact.format_version, FORMAT_VERSION
        )));
    }

    let n_classes = artifact.classes.len();
    if n_classes == 0 {
        return Err(invalid("pipeline has no classes"));
    }
    if artifact.classes.iter().any(|c| c.trim().is_empty()) {
        return Err(invalid("class labels must not be blank"));
    }
    let unique: HashSet<&str> = artifact.classes.iter().map(String::as_str).collect();
    if unique.len() != n_classes {
        return Err(invalid("class labels must be unique"));
    }

    let vectorizer = &artifact.vectorizer;
    let (min_n, max_n) = vectorizer.ngram_range;
    if min_n < 1 || min_n > max_n {
        return Err(invalid(format!("invalid ngram_range ({}, {})", min_n, max_n)));
    }

    let (rows, bias) = artifact.estimator.weights();
    let n_features = artifact.estimator.n_features();
    if rows.iter().any(|row| row.len() != n_features) {
        return Err(invalid("estimator weight rows have different lengths"));
    }

    let binary_logistic = matches!(
        artifact.estimator,
        EstimatorSpec::LogisticRegression { .. } | EstimatorSpec::LinearSvc { .. }
    ) && n_classes == 2
        && rows.len() == 1;
    if rows.len() != n_classes && !binary_logistic {
        return Err(invalid(format!(
            "{} has {} weight rows for {} classes",
            artifact.estimator.kind(),
            rows.len(),
            n_classes
        )));
    }
    if bias.len() != rows.len() {
        return Err(invalid(format!(
            "{} bias length {} does not match {} weight rows",
            artifact.estimator.kind(),
            bias.len(),
            rows.len()
        )));
    }

    if let Some((term, &index)) = vectorizer.vocabulary.iter().find(|(_, &i)| i >= n_features) {
        return Err(invalid(format!(
            "vocabulary term {:?} maps to index {} beyond {} features",
            term, index, n_features
        )));
    }

    if let Some(idf) = &vectorizer.idf {
        if idf.len() != n_features {
            return Err(invalid(format!(
                "idf length {} does not match {} features",
                idf.len(),
                n_features
            )));
        }
    }

    Ok(())
}

fn invalid(msg: impl Into<String>) -> ModelError {
    ModelError::InvalidArtifact(msg.into())
}
