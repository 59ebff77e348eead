//! Error types for fcheck-fs

use std::path::PathBuf;

/// Result type for fcheck-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fcheck-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path {path} is not inside {root}")]
    OutsideRoot { root: PathBuf, path: PathBuf },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("SHA1 value '{digest}' of path {path} is invalid")]
    InvalidDigest { digest: String, path: PathBuf },

    #[error("File {path} content is invalid: {message}")]
    ArtifactParse { path: PathBuf, message: String },

    #[error("Failed to serialize artifact for {path}: {message}")]
    ArtifactSerialize { path: PathBuf, message: String },

    #[error("Path {path} is not a regular file")]
    NotRegularFile { path: PathBuf },

    #[error("Path {path} already exists")]
    AlreadyExists { path: PathBuf },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
