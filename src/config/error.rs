//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The vectorizer URL is not an http(s) URL.
    #[error("invalid vectorizer URL '{value}': must start with http:// or https://")]
    InvalidUrl { value: String },

    /// A retry count could not be parsed or was zero.
    #[error("invalid retry count '{value}': must be a positive integer")]
    InvalidRetries { value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
