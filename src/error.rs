//! Error types for papercast-docs
//!
//! This module defines all error types produced while fetching, parsing,
//! rendering and injecting the plugin registry. Uses `thiserror` for
//! ergonomic error handling with automatic `Display` and `Error` trait
//! implementations.

use thiserror::Error;

/// The primary error type for papercast-docs operations.
#[derive(Error, Debug)]
pub enum DocsError {
    /// Configuration-related errors (invalid config file, bad env values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The registry server answered with a non-success status.
    #[error("Registry request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Registry text could not be parsed into plugin descriptors
    #[error("Parse error: {0}")]
    Parse(String),

    /// A container slot expected by the page is absent from the template
    #[error("Missing container slot: no element with id \"{0}\" in page")]
    MissingSlot(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A specialized `Result` type for papercast-docs operations.
pub type Result<T> = std::result::Result<T, DocsError>;
