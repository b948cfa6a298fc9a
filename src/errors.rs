//! Error types for the moodtrack application.
//!
//! This module defines the error categories that can surface while recording
//! and charting mood entries.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the moodtrack application.
#[derive(Error, Debug)]
pub enum MoodError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors reported by the SQLite store.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// User input was rejected before reaching the store.
    #[error("{message}")]
    Validation { message: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    #[error("{message}")]
    EditorError { message: String },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}

impl MoodError {
    pub fn validation(message: impl Into<String>) -> Self {
        MoodError::Validation {
            message: message.into(),
        }
    }
}
