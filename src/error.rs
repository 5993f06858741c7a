//! Error types for the explorer core.
//!
//! Defines the main error enum used throughout the crate.

use std::time::Duration;
use thiserror::Error;

/// Main error type for explorer operations.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Network failures (host unreachable, DNS, TLS, unexpected HTTP status).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// The provider rejected the query (syntax errors, constraint violations, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// The response matched neither known wire format.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The caller-supplied query was unusable (e.g. empty).
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors (invalid config file, bad URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (unexpected states, I/O on export files, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExplorerError {
    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a provider error carrying the provider's message verbatim.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Creates a malformed-response error with the given message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true for failures a caller may reasonably offer to retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Transport(_))
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Transport Error",
            Self::Timeout(_) => "Timeout Error",
            Self::Provider(_) => "Provider Error",
            Self::MalformedResponse(_) => "Malformed Response",
            Self::Query(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using ExplorerError.
pub type Result<T> = std::result::Result<T, ExplorerError>;
