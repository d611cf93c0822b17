//! Error types for spam-server

use spam_core::ClassifierError;
use thiserror::Error;

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Classification or resource loading error
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
