//! Domain errors for the Crucible pipeline.

use thiserror::Error;

/// Domain-level errors that can occur while running the pipeline.
///
/// Stage-level model failures never appear here: the orchestrator folds
/// them into the task record as error-marker artifacts. Only conditions
/// that stop a run (or its persistence) surface as errors.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("A pipeline run is already in progress")]
    RunInProgress,

    #[error("Run cancelled before completion")]
    Cancelled,

    #[error("History persistence failed: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}
