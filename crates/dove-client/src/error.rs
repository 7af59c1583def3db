//! Error types for the client core

use crate::forms::ValidationError;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the view layer. None of them is fatal: each is
/// recovered at the level of the user interaction that caused it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request could not be sent or the response body could not be read
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("{endpoint} returned {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// No active session; the caller must be sent to sign-in
    #[error("Sign-in required")]
    Unauthenticated,

    /// Signed in, but the operation is admin-only
    #[error("Admin access required")]
    Forbidden,

    /// Admin form failed its required-field checks
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Durable key-value store failure
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),

    /// JSON encoding or decoding failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Session token could not be decoded
    #[error("Invalid session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A blocking storage task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Transport failure or non-success status: callers fall back to an
    /// empty or previously cached list.
    pub fn is_network_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status { .. })
    }

    /// The view layer should redirect to the sign-in flow.
    pub fn requires_sign_in(&self) -> bool {
        match self {
            Self::Unauthenticated => true,
            Self::Status { status, .. } => *status == reqwest::StatusCode::UNAUTHORIZED,
            _ => false,
        }
    }
}
