//! Error types for the Leadflow SDK

use thiserror::Error;

/// Result type alias for Leadflow SDK operations
pub type Result<T> = std::result::Result<T, LeadflowError>;

/// Errors that can occur when calling the Leadflow API
#[derive(Error, Debug)]
pub enum LeadflowError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LeadflowError {
    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LeadflowError::Api { status, .. } => Some(*status),
            LeadflowError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}
