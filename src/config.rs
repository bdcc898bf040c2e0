//! Configuration module

use std::env;
use std::path::PathBuf;

/// Stdout log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Serialized language detection pipeline
    pub model_path: PathBuf,

    /// Optional audit log file (appended)
    pub log_file: Option<PathBuf>,

    /// Stdout log format
    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_path: var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("language_detection_pipeline.json")),

            log_file: var("LOG_FILE")
                .filter(|f| !f.trim().is_empty())
                .map(PathBuf::from),

            log_format: match var("LOG_FORMAT").as_deref() {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },

            environment: var("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
