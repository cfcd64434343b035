//! Error types for endpoint tracking.

use thiserror::Error;

/// Errors produced while building records or wiring a session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// Host is empty or not a usable network location.
    #[error("invalid host: {0}")]
    InvalidHost(String),
    /// Port is non-numeric or outside `0..=65535`.
    #[error("invalid port: {0}")]
    InvalidPort(String),
    /// Configuration failed validation.
    #[error("config error: {0}")]
    Config(String),
    /// Backend-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
