//! Error types for the legal records store

use std::fmt;

#[derive(Debug)]
pub enum RecordsError {
    /// Remote source error; retry policy belongs to the caller
    Source(intel_api::IntelError),
    /// Cache file IO error
    Io(std::io::Error),
    /// Cache blob (de)serialization error
    Json(serde_json::Error),
    /// Configuration error
    Config(String),
}

impl fmt::Display for RecordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(e) => write!(f, "{}", e),
            Self::Io(e) => write!(f, "cache IO error: {}", e),
            Self::Json(e) => write!(f, "cache serialization error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for RecordsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<intel_api::IntelError> for RecordsError {
    fn from(e: intel_api::IntelError) -> Self {
        Self::Source(e)
    }
}

impl From<std::io::Error> for RecordsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for RecordsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<tracing_subscriber::filter::ParseError> for RecordsError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;
