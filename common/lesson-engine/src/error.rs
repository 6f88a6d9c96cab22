//! Error types for lesson content loading
//!
//! Only loading and validating lesson content can fail. Resolving commands,
//! driving a terminal session and navigating steps are total operations and
//! never return an error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a lesson catalog
#[derive(Debug, Error)]
pub enum LessonError {
    /// The content file could not be read
    #[error("Failed to read lesson content from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content file is not valid TOML for the lesson schema
    #[error("Failed to parse lesson content: {0}")]
    Parse(#[from] toml::de::Error),

    /// The content parsed but describes an unusable catalog
    #[error("Invalid lesson content: {0}")]
    InvalidContent(String),
}

pub type LessonResult<T> = Result<T, LessonError>;
