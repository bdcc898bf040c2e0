//! Language identification request/response models

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::classifier::Prediction;

/// Decimal places kept in the reported confidence
pub const CONFIDENCE_DECIMALS: i32 = 4;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClassificationRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,
}

impl ClassificationRequest {
    /// Text handed to the classifier (surrounding whitespace removed)
    pub fn cleaned_text(&self) -> &str {
        self.text.trim()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClassificationResponse {
    #[validate(length(min = 1), custom(function = "validate_uppercase"))]
    pub language_code: String,

    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence: f64,
}

impl From<Prediction> for ClassificationResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            language_code: prediction.label.trim().to_uppercase(),
            confidence: round_confidence(prediction.confidence),
        }
    }
}

pub fn round_confidence(value: f64) -> f64 {
    let scale = 10f64.powi(CONFIDENCE_DECIMALS);
    (value * scale).round() / scale
}

fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Text must not be empty.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_uppercase(code: &str) -> Result<(), ValidationError> {
    if code.chars().any(char::is_lowercase) {
        return Err(ValidationError::new("not_uppercase"));
    }
    Ok(())
}

/// Flatten field errors into one human readable line
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
