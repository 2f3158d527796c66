//! All error types for the transfill crate.
//!
//! Returned from every fallible operation (discovery, extraction, translation, merge).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("completion response contained no choices")]
    EmptyResponse,
}

impl Error {
    /// Creates a new configuration error. These abort a run before any task starts.
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    /// Creates a new invalid-document error.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Error::InvalidDocument(message.into())
    }
}
