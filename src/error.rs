//! Error types for Gander
//!
//! This module defines the error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Gander operations
///
/// The backend makes no distinction between "unreachable", "returned
/// 4xx/5xx" and "returned a malformed body", and neither do the callers:
/// every variant is logged and either replaced by the chat fallback or
/// ignored (file operations keep their previous list).
#[derive(Error, Debug)]
pub enum GanderError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-success HTTP status from the backend
    ///
    /// Carries the generic per-operation message (e.g. "Upload failed").
    #[error("{0}")]
    Api(String),

    /// The backend answered with a body of the wrong shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// User input that cannot be acted on (e.g. a blank question)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Mock login rejected the credentials
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Gander operations
///
/// Uses `anyhow::Error` so callers can attach context; the concrete
/// [`GanderError`] is recoverable with `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
