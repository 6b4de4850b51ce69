//! Error types for the zimvault core library.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// All errors that can occur while converting a note tree.
#[derive(Debug, Error)]
pub enum ZimvaultError {
    /// Reading, writing, moving or deleting a file failed.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the note tree failed.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// An explicitly requested options file could not be used.
    #[error("Invalid options: {0}")]
    Options(String),

    /// A report or options value could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The conversion root does not exist or is not a directory.
    #[error("Invalid root directory: {}", .0.display())]
    InvalidRoot(PathBuf),
}

/// Convenience alias that pins the error type to [`ZimvaultError`].
pub type Result<T> = std::result::Result<T, ZimvaultError>;

impl ZimvaultError {
    /// Wraps an [`std::io::Error`] together with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { path, source } => format!("File error on {}: {source}", path.display()),
            Self::Walk(e) => format!("Could not read the note tree: {e}"),
            Self::Options(msg) => format!("Options file rejected: {msg}"),
            Self::Json(e) => format!("Data format error: {e}"),
            Self::InvalidRoot(path) => format!("{} is not a directory", path.display()),
        }
    }
}
