//! Error types for spam-core

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for classification operations
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Classification error types
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Message was empty or whitespace-only. Expected, shown to the user as a warning.
    #[error("Message is empty")]
    EmptyInput,

    /// A model artifact or linguistic resource could not be loaded at startup
    #[error("Failed to load {}: {reason}", path.display())]
    ArtifactLoad { path: PathBuf, reason: String },

    /// Artifacts produced output outside their contract (bad label, bad shape)
    #[error("Artifact contract violation: {0}")]
    ContractViolation(String),

    /// Input could not be decoded into tokens
    #[error("Tokenization failed: {0}")]
    Tokenization(String),
}

impl ClassifierError {
    /// Build an `ArtifactLoad` error for the given path
    pub fn artifact_load(path: &Path, reason: impl Into<String>) -> Self {
        Self::ArtifactLoad {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// True for the one condition that is reported as a warning rather than a failure
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_load_message_names_path() {
        let err = ClassifierError::artifact_load(Path::new("models/model.json"), "file not found");
        assert_eq!(
            err.to_string(),
            "Failed to load models/model.json: file not found"
        );
    }

    #[test]
    fn test_empty_input_is_not_a_failure() {
        assert!(ClassifierError::EmptyInput.is_empty_input());
        assert!(!ClassifierError::ContractViolation("x".into()).is_empty_input());
    }
}
