//! Error types for fcheck-cli

use fcheck_core::Error as CoreError;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from fcheck-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The log subscriber could not be installed
    #[error("Failed to set tracing subscriber: {0}")]
    Tracing(#[from] tracing::subscriber::SetGlobalDefaultError),
}

impl CliError {
    /// Flag the user can pass to get past this error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Core(CoreError::OverwriteNotConfirmed { .. }) => Some("specify -y to overwrite"),
            Self::Core(CoreError::RepackNotConfirmed { .. }) => {
                Some("specify -y to delete and repack")
            }
            _ => None,
        }
    }
}
