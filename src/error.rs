//! Error types for mdforge operations.

use thiserror::Error;

use crate::validate::ValidationError;

/// Errors raised by the layers around the document core: config loading,
/// entry decoding and file output. Building and rendering never fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Generated markdown is malformed: {0}")]
    Validation(#[from] ValidationError),

    #[error("No changelog entries found")]
    NoEntries,
}

pub type Result<T> = std::result::Result<T, Error>;
