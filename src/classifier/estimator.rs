//! Linear estimators over sparse feature vectors

use super::artifact::{EstimatorSpec, MultiClass};
use super::vectorizer::SparseVector;
use super::ModelError;

/// Fitted estimator ready for scoring
pub struct Estimator {
    spec: EstimatorSpec,
    n_classes: usize,
}

impl Estimator {
    pub fn new(spec: EstimatorSpec, n_classes: usize) -> Self {
        Self { spec, n_classes }
    }

    pub fn kind(&self) -> &'static str {
        self.spec.kind()
    }

    pub fn has_predict_proba(&self) -> bool {
        !matches!(self.spec, EstimatorSpec::LinearSvc { .. })
    }

    /// Raw per-class scores (joint log-likelihood for NB, margins otherwise)
    pub fn decision_function(&self, x: &SparseVector) -> Vec<f64> {
        let (rows, bias) = match &self.spec {
            EstimatorSpec::MultinomialNb { class_log_prior, feature_log_prob } => {
                (feature_log_prob, class_log_prior)
            }
            EstimatorSpec::LogisticRegression { coef, intercept, .. }
            | EstimatorSpec::LinearSvc { coef, intercept } => (coef, intercept),
        };

        rows.iter()
            .zip(bias)
            .map(|(row, b)| b + x.iter().map(|(&j, &v)| v * row[j]).sum::<f64>())
            .collect()
    }

    /// Class probabilities, or `None` when the estimator has no probability model
    pub fn predict_proba(&self, x: &SparseVector) -> Result<Option<Vec<f64>>, ModelError> {
        if !self.has_predict_proba() {
            return Ok(None);
        }

        let scores = self.decision_function(x);
        ensure_finite(&scores)?;

        let proba = match &self.spec {
            EstimatorSpec::LogisticRegression { .. } if scores.len() == 1 && self.n_classes == 2 => {
                let p = sigmoid(scores[0]);
                vec![1.0 - p, p]
            }
            EstimatorSpec::LogisticRegression { multi_class: MultiClass::Ovr, .. } => {
                let p: Vec<f64> = scores.iter().map(|&s| sigmoid(s)).collect();
                let total: f64 = p.iter().sum();
                p.into_iter().map(|v| v / total).collect()
            }
            _ => softmax(&scores),
        };
        // all-underflow OvR rows come out as 0/0
        ensure_finite(&proba)?;

        Ok(Some(proba))
    }

    /// Class index picked by the decision function alone
    pub fn predict_index(&self, x: &SparseVector) -> Result<usize, ModelError> {
        let scores = self.decision_function(x);
        ensure_finite(&scores)?;

        if scores.len() == 1 && self.n_classes == 2 {
            return Ok(usize::from(scores[0] > 0.0));
        }
        argmax(&scores).ok_or_else(|| ModelError::Inference("estimator produced no scores".to_string()))
    }
}

fn ensure_finite(scores: &[f64]) -> Result<(), ModelError> {
    if scores.iter().all(|s| s.is_finite()) {
        Ok(())
    } else {
        Err(ModelError::Inference(format!("non-finite decision scores: {:?}", scores)))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Numerically stable softmax (log-sum-exp shift)
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Index of the largest value, first one on ties
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}
