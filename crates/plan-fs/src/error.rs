//! Error types for plan-fs

use std::path::PathBuf;

/// Result type for plan-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating or loading configuration documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("No configuration file ({candidates}) found in {start} or any parent directory")]
    ConfigNotFound { start: PathBuf, candidates: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
