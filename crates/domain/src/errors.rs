//! Error types used throughout the adaptor

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Go.Data operations
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum GoDataError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("{count} {resource} matched {field}; aborting upsert")]
    MultipleMatches { resource: String, field: String, count: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GoDataError {
    /// Whether this error must terminate the whole operation sequence.
    ///
    /// Only authentication failures are fatal; every other failure is
    /// absorbed by the pipeline and recorded against the failing step.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Network(_) => "network",
            Self::Server(_) => "server",
            Self::Client(_) => "client",
            Self::MultipleMatches { .. } => "multiple_matches",
            Self::InvalidInput(_) => "invalid_input",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Go.Data operations
pub type Result<T> = std::result::Result<T, GoDataError>;
