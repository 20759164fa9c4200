//! Error types for the registry client

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Registry client errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Set not found: {0}")]
    SetNotFound(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid set record: {0}")]
    Model(#[from] radcde_models::Error),
}
