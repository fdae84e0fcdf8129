//! # Sync Error Types
//!
//! Unified error handling for the record source, alias creator, status writer
//! and the job entry point.

use thiserror::Error;

/// Result type used across the crate
pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl SyncError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an API error from an HTTP status and response text
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error stops the job before any record is processed
    #[must_use]
    pub fn is_fatal_precondition(&self) -> bool {
        matches!(
            self,
            SyncError::MissingCredential(_) | SyncError::Configuration(_)
        )
    }
}

impl From<config::ConfigError> for SyncError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
