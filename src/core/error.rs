//! Error types and error handling for the audioshelf service.
//!
//! This module defines the error types used throughout the
//! application. HTTP status mapping lives here so both the web
//! adapter and the CLI agree on which failures are the caller's
//! fault; rendering of error pages is done in the `http` adapter.

use std::path::PathBuf;

use axum::http::StatusCode;
use thiserror::Error;

/// Result type alias for audioshelf operations
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Main error type for the audioshelf service
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Persisted library file exists but cannot be read or parsed.
    /// Fatal at startup.
    #[error("Failed to load library config {path:?}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    /// Library file could not be written after a mutation.
    #[error("Failed to save library config {path:?}: {source}")]
    ConfigSave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured directory could not be traversed.
    #[error("Error reading directory {path:?}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A submitted directory does not exist.
    #[error("Invalid directory: {0}")]
    InvalidDirectory(String),

    /// The tunnel binary could not be started.
    #[error("Failed to start tunnel for domain {domain}: {source}")]
    TunnelLaunch {
        domain: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Library store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl LibraryError {
    /// Convert error to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            LibraryError::InvalidDirectory(_) => StatusCode::BAD_REQUEST,
            LibraryError::DirectoryUnreadable { .. } => StatusCode::NOT_FOUND,
            LibraryError::ConfigLoad { .. }
            | LibraryError::ConfigSave { .. }
            | LibraryError::TunnelLaunch { .. }
            | LibraryError::StoreUnavailable(_)
            | LibraryError::Settings(_)
            | LibraryError::IoError(_)
            | LibraryError::SerdeError(_)
            | LibraryError::TomlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Errors that must stop the process before it serves anything
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LibraryError::ConfigLoad { .. } | LibraryError::Settings(_)
        )
    }

    /// Errors the viewer caused and can fix by resubmitting
    pub fn is_bad_request(&self) -> bool {
        matches!(self, LibraryError::InvalidDirectory(_))
    }
}
