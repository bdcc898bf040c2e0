//! OpenAPI document

use axum::Json;
use serde_json::{json, Value};

use crate::models::CONFIDENCE_DECIMALS;

/// GET /openapi.json
pub async fn openapi() -> Json<Value> {
    Json(document())
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
    })
}

pub fn document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "MuseumLangAPI",
            "description": "Automatic language identification for museum texts.",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/identify-language": { "post": identify_operation() },
            "/": { "get": health_operation("Liveness message", "Service is running") },
            "/health": { "get": health_operation("Service and model status", "Health report") }
        },
        "components": { "schemas": schemas() }
    })
}

fn identify_operation() -> Value {
    json!({
        "summary": "Identify the language of a text",
        "requestBody": {
            "required": true,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/LanguageRequest" } } }
        },
        "responses": {
            "200": {
                "description": "Detected language",
                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/LanguageResponse" } } }
            },
            "400": error_response("Empty text"),
            "413": error_response("Body larger than 2 MB"),
            "415": error_response("Missing application/json content type"),
            "422": error_response("Malformed body or missing text field"),
            "500": error_response("Model failure")
        }
    })
}

fn health_operation(summary: &str, description: &str) -> Value {
    json!({
        "summary": summary,
        "tags": ["Health Check"],
        "responses": { "200": { "description": description } }
    })
}

fn schemas() -> Value {
    let language_response = json!({
        "type": "object",
        "required": ["language_code", "confidence"],
        "properties": {
            "language_code": { "type": "string", "example": "IT" },
            "confidence": {
                "type": "number",
                "minimum": 0.0,
                "maximum": 1.0,
                "description": format!("Rounded to {} decimal places", CONFIDENCE_DECIMALS)
            }
        }
    });

    json!({
        "LanguageRequest": {
            "type": "object",
            "required": ["text"],
            "properties": { "text": { "type": "string", "minLength": 1 } }
        },
        "LanguageResponse": language_response,
        "ErrorResponse": {
            "type": "object",
            "properties": {
                "error": { "type": "string" },
                "status": { "type": "integer" }
            }
        }
    })
}
