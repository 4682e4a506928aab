//! Error handling for the oasform pipeline.
//!
//! This module defines the crate-wide `Error` type along with a `Result`
//! alias. Soft failures (missing input, unreachable URLs, generator failures)
//! never surface here; they are turned into prompts or empty results at the
//! step where they happen. What remains are genuine faults: local I/O,
//! template rendering, archive writing, and generated code that cannot be
//! parsed.
//!
//! # Examples
//!
//! ```
//! use oasform::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("generator program must not be empty"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for oasform operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for oasform operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (cache keys)
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input could not be decoded as UTF-8 text
    #[error("Decode error: {0}")]
    Decode(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generated module could not be parsed
    #[error("Failed to parse generated module '{module}': {message}")]
    Introspection { module: String, message: String },

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Archive writing error
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Output error
    #[error("Output error: {0}")]
    Output(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new output error
    pub fn output<S: Into<String>>(msg: S) -> Self {
        Self::Output(msg.into())
    }
}
