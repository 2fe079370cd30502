//! Error types for solrmap.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SolrmapError`] enum. Mapping failures carry the entity type or the
//! field name that caused them so configuration defects can be traced
//! back to their source.
//!
//! # Examples
//!
//! ```
//! use solrmap::error::{Result, SolrmapError};
//!
//! fn load() -> Result<()> {
//!     Err(SolrmapError::metadata("no metadata registered for type `Book`"))
//! }
//!
//! assert!(load().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for solrmap operations.
#[derive(Error, Debug)]
pub enum SolrmapError {
    /// The entity type has no usable field mapping.
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// A getter expression names an unknown method or its invocation failed.
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// A mapped value has a shape the document cannot hold.
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Raised by a transport implementation; passed through untouched.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (config files, CLI output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SolrmapError.
pub type Result<T> = std::result::Result<T, SolrmapError>;

impl SolrmapError {
    /// Create a new metadata error.
    pub fn metadata<S: Into<String>>(msg: S) -> Self {
        SolrmapError::Metadata(msg.into())
    }

    /// Create a new resolution error.
    pub fn resolution<S: Into<String>>(msg: S) -> Self {
        SolrmapError::Resolution(msg.into())
    }

    /// Create a new mapping error.
    pub fn mapping<S: Into<String>>(msg: S) -> Self {
        SolrmapError::Mapping(msg.into())
    }

    /// Create a new transport error.
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        SolrmapError::Transport(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SolrmapError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SolrmapError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SolrmapError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
