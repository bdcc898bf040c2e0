//! Language identification handler

use axum::{extract::{rejection::JsonRejection, State}, Json};
use validator::Validate;

use crate::{AppState, AppError, AppResult};
use crate::models::{describe_errors, ClassificationRequest, ClassificationResponse};

/// POST /identify-language
pub async fn identify(
    State(state): State<AppState>,
    payload: Result<Json<ClassificationRequest>, JsonRejection>,
) -> AppResult<Json<ClassificationResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("[BadRequest] Rejected payload: {}", rejection.body_text());
        AppError::from(rejection)
    })?;

    if let Err(errors) = req.validate() {
        tracing::warn!("[BadRequest] Empty text received: {:?}", req.text);
        return Err(AppError::ValidationError(describe_errors(&errors)));
    }

    let text = req.cleaned_text().to_string();
    let text_len = text.chars().count();

    // CPU-bound, keep it off the async workers
    let classifier = state.classifier.clone();
    let prediction = tokio::task::spawn_blocking(move || classifier.predict(&text)).await??;

    let response = ClassificationResponse::from(prediction);
    if let Err(errors) = response.validate() {
        return Err(AppError::InferenceError(format!(
            "model output failed validation ({}): {:?}",
            describe_errors(&errors),
            response
        )));
    }

    tracing::info!(
        text_len,
        language_code = %response.language_code,
        confidence = response.confidence,
        "[Predict] language identified"
    );

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::classifier::{LanguageClassifier, ModelError, ModelInfo, Prediction};
    use crate::config::Config;

    struct FixedClassifier(Result<Prediction, String>);

    impl LanguageClassifier for FixedClassifier {
        fn predict(&self, _text: &str) -> Result<Prediction, ModelError> {
            self.0.clone().map_err(ModelError::Inference)
        }

        fn info(&self) -> ModelInfo {
            ModelInfo {
                name: "fixed".to_string(),
                estimator: "fixed".to_string(),
                languages: vec!["it".to_string()],
                vocabulary_size: 0,
                loaded_at: chrono::Utc::now(),
            }
        }
    }

    fn state_with(result: Result<Prediction, String>) -> AppState {
        AppState {
            classifier: Arc::new(FixedClassifier(result)),
            config: Config::from_env(),
        }
    }

    fn request(text: &str) -> Result<Json<ClassificationRequest>, JsonRejection> {
        Ok(Json(ClassificationRequest { text: text.to_string() }))
    }

    #[tokio::test]
    async fn test_maps_prediction_to_response() {
        let state = state_with(Ok(Prediction { label: "it".into(), confidence: 0.912_345 }));
        let Json(response) = identify(State(state), request("Buongiorno")).await.unwrap();
        assert_eq!(response.language_code, "IT");
        assert_eq!(response.confidence, 0.9123);
    }

    #[tokio::test]
    async fn test_blank_text_is_validation_error() {
        let state = state_with(Ok(Prediction { label: "it".into(), confidence: 1.0 }));
        let result = identify(State(state), request("  \n")).await;
        assert!(matches!(result, Err(AppError::ValidationError(msg)) if msg == "Text must not be empty."));
    }

    #[tokio::test]
    async fn test_model_failure_is_inference_error() {
        let state = state_with(Err("corrupt weights".into()));
        let result = identify(State(state), request("Hello")).await;
        assert!(matches!(result, Err(AppError::InferenceError(_))));
    }

    #[tokio::test]
    async fn test_out_of_range_output_is_inference_error() {
        let state = state_with(Ok(Prediction { label: "en".into(), confidence: 1.7 }));
        let result = identify(State(state), request("Hello")).await;
        tokio_test::assert_err!(result);
    }
}
