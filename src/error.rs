//! Error types for the Homophony library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`HomophonyError`] enum.
//!
//! # Examples
//!
//! ```
//! use homophony::error::{HomophonyError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(HomophonyError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Homophony operations.
#[derive(Error, Debug)]
pub enum HomophonyError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The canonical dictionary could not be read. Always fatal.
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid rewrite rule pattern
    #[error("Rule error: {0}")]
    Rule(#[from] regex::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Thread pool or worker errors
    #[error("Worker error: {0}")]
    Worker(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with HomophonyError.
pub type Result<T> = std::result::Result<T, HomophonyError>;

impl HomophonyError {
    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        HomophonyError::Dictionary(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        HomophonyError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        HomophonyError::Config(msg.into())
    }

    /// Create a new worker error.
    pub fn worker<S: Into<String>>(msg: S) -> Self {
        HomophonyError::Worker(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HomophonyError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        HomophonyError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        HomophonyError::Other(format!("Internal error: {}", msg.into()))
    }
}
