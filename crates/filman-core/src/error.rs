//! Error types for the filman.cc scraper
//!
//! Provides a single error enum with human-readable messages
//! and string serialization for front-end consumption.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all filman.cc scraper operations
///
/// Implements Display for human-readable messages and Serialize
/// so the error can be handed to a front-end unchanged.
#[derive(Error, Debug)]
pub enum FilmanError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Preferences file could not be read or written
    #[error("Preferences I/O failed: {0}")]
    PreferencesIo(#[from] std::io::Error),

    /// Preferences document is not valid JSON
    #[error("Invalid preferences document: {0}")]
    PreferencesFormat(#[from] serde_json::Error),
}

impl Serialize for FilmanError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for filman.cc operations
pub type Result<T> = std::result::Result<T, FilmanError>;
