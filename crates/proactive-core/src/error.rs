//! Core error types for proactive-core.
//!
//! Board fetch failures, model failures and configuration problems each get
//! their own enum. Board and model failures degrade inside the snapshot and
//! insight wrappers; [`CoreError`] covers what reaches a command line caller.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported to the user by a command.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The board returned no cards.
    #[error("No cards found. Check Trello credentials.")]
    EmptyBoard,
}

/// Errors raised while talking to the task board.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Credentials or board id missing from the configuration
    #[error("{service} is not configured: missing {field}")]
    NotConfigured {
        service: &'static str,
        field: &'static str,
    },

    /// Transport failure, including timeouts
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Board answered with a non-success status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Body could not be decoded into board records
    #[error("could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Endpoint URL could not be built
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors raised by the text-generation collaborator.
#[derive(Error, Debug)]
pub enum InsightError {
    /// No API key configured
    #[error("insight model is not configured")]
    NotConfigured,

    /// Transport failure, including timeouts
    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Model answered with a non-success status
    #[error("model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response carried no candidate text
    #[error("model returned no text")]
    EmptyResponse,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Home/config directory could not be resolved or created
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Required request field missing or empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Lookup by id failed
    #[error("Task not found: {0}")]
    TaskNotFound(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn require_task(id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(ValidationError::MissingField("task_id").into());
        }
        Err(ValidationError::TaskNotFound(id.to_string()).into())
    }

    #[test]
    fn validation_errors_wrap_with_context() {
        let err = require_task("").unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::MissingField(_))));
        assert_eq!(err.to_string(), "Validation error: task_id is required");

        let err = require_task("c9").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Task not found: c9");
    }

    #[test]
    fn config_and_json_errors_convert() {
        let err: CoreError = ConfigError::UnknownKey("a.b".into()).into();
        assert_eq!(err.to_string(), "Configuration error: unknown config key: a.b");

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(CoreError::from(json_err), CoreError::Json(_)));
    }
}
