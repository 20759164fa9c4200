//! Error types for CDE models

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Contract violation at a call site (empty name, too few values).
    /// Not recoverable at runtime; the caller must fix the call.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A raw record failed structural validation. Carries every issue found,
    /// not just the first.
    #[error("Validation failed with {} issue(s)", .issues.len())]
    Validation {
        issues: Vec<crate::validation::ValidationIssue>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
