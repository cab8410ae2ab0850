//! Error types for the intel server client

use std::fmt;

/// Errors that can occur when talking to the intel server
#[derive(Debug)]
pub enum IntelError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// Failed to parse JSON response
    Json(serde_json::Error),
    /// Server answered with an unexpected status
    Api(String),
}

impl fmt::Display for IntelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "intel server HTTP error: {}", e),
            Self::Json(e) => write!(f, "intel server JSON parse error: {}", e),
            Self::Api(msg) => write!(f, "intel server API error: {}", msg),
        }
    }
}

impl std::error::Error for IntelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Api(_) => None,
        }
    }
}

impl From<reqwest::Error> for IntelError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for IntelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for intel server operations
pub type Result<T> = std::result::Result<T, IntelError>;
