//! Error types for templar operations.
//!
//! This module defines [`TemplarError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Only `add_repository` (duplicate URL) and the single-target
//!   enable/disable operations (unknown key) surface domain errors to callers
//! - Fetch and extension errors are caught per item at the aggregation
//!   boundary and only ever logged
//! - Use `anyhow::Error` (via `TemplarError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for templar operations.
#[derive(Debug, Error)]
pub enum TemplarError {
    /// Repository URL is already registered.
    #[error("{url} is not a unique URL. Repository URLs must be unique")]
    DuplicateUrl { url: String },

    /// No repository with this URL.
    #[error("no repository found with URL '{url}'")]
    RepositoryNotFound { url: String },

    /// No extension registered under this name.
    #[error("no extension found with name '{name}'")]
    ExtensionNotFound { name: String },

    /// Extension registration rejected.
    #[error("Invalid extension '{name}': {message}")]
    InvalidExtension { name: String, message: String },

    /// Repository has no URL to fetch from.
    #[error("repo '{repo}' must have a URL")]
    MissingUrl { repo: String },

    /// Repository URL could not be parsed.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Remote index answered with something other than 200.
    #[error("Unexpected HTTP status for {repo}: {status}")]
    UnexpectedStatus { repo: String, status: u16 },

    /// Remote index body is not JSON.
    #[error("URL '{url}' should return JSON")]
    NotJson { url: String },

    /// Remote index body is JSON but not a list of template summaries.
    #[error("URL '{url}' returned an invalid template index: {message}")]
    InvalidIndex { url: String, message: String },

    /// Transport-level failure talking to a repository.
    #[error("Request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Failed to parse a settings or list file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to serialize data for persistence.
    #[error("Failed to serialize {what}: {message}")]
    Serialization { what: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TemplarError {
    /// Whether this error means the addressed repository or extension does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RepositoryNotFound { .. } | Self::ExtensionNotFound { .. }
        )
    }
}

/// Result type alias for templar operations.
pub type Result<T> = std::result::Result<T, TemplarError>;
