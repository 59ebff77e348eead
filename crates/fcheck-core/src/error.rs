//! Error types for fcheck-core

use std::path::PathBuf;

use fcheck_fs::SerializablePath;

/// Result type for fcheck-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of a failure, independent of where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Open, read, write or traversal failure, including vanished files
    Io,
    /// Malformed digest, path or artifact content
    InvalidInput,
    /// The operation would clobber or nest something it must not
    Conflict,
}

/// Errors that can occur in fcheck-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Directory traversal failed part way through
    #[error("Failed to walk through path {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A file selected for packaging could not be copied
    #[error("Failed to copy {category} file '{path}': {source}")]
    Copy {
        category: &'static str,
        path: SerializablePath,
        #[source]
        source: fcheck_fs::Error,
    },

    /// An artifact parsed but violates its invariants
    #[error("{artifact} {path} is invalid: {message}")]
    InvalidArtifact {
        artifact: &'static str,
        path: PathBuf,
        message: String,
    },

    /// The package directory would contain (or be) the source directory
    #[error("Output path {output} is the parent of source directory path {source_dir}")]
    OutputNestsSource { output: PathBuf, source_dir: PathBuf },

    /// A removal script with the generated name is already present
    #[error("Removal script {path} to be generated exists")]
    ScriptExists { path: PathBuf },

    /// The output file exists and overwriting it was not confirmed
    #[error("Output path {path} exists, overwrite was not confirmed")]
    OverwriteNotConfirmed { path: PathBuf },

    /// The package directory exists and repacking was not confirmed
    #[error("Output directory path {path} exists, repack was not confirmed")]
    RepackNotConfirmed { path: PathBuf },

    /// An output path is occupied by the wrong kind of filesystem entry
    #[error("Output path {path} is {found}, expected {expected}")]
    WrongPathType {
        path: PathBuf,
        expected: &'static str,
        found: &'static str,
    },

    /// The work directory or input artifact is the wrong kind of entry
    #[error("Input path {path} is {found}, expected {expected}")]
    WrongInputType {
        path: PathBuf,
        expected: &'static str,
        found: &'static str,
    },

    /// The directory to audit does not exist
    #[error("Source directory {path} does not exist")]
    DirectoryNotFound { path: PathBuf },

    /// The manifest or diff to read does not exist
    #[error("Input file {path} does not exist")]
    InputNotFound { path: PathBuf },

    /// Filesystem error from fcheck-fs
    #[error(transparent)]
    Fs(#[from] fcheck_fs::Error),
}

impl Error {
    /// The kind of failure, for callers that branch on category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Walk { .. }
            | Self::Copy { .. }
            | Self::DirectoryNotFound { .. }
            | Self::InputNotFound { .. } => ErrorKind::Io,
            Self::InvalidArtifact { .. } | Self::WrongInputType { .. } => ErrorKind::InvalidInput,
            Self::OutputNestsSource { .. }
            | Self::ScriptExists { .. }
            | Self::OverwriteNotConfirmed { .. }
            | Self::RepackNotConfirmed { .. }
            | Self::WrongPathType { .. } => ErrorKind::Conflict,
            Self::Fs(inner) => fs_kind(inner),
        }
    }
}

fn fs_kind(error: &fcheck_fs::Error) -> ErrorKind {
    use fcheck_fs::Error as Fs;

    match error {
        Fs::Io { .. } | Fs::LockFailed { .. } | Fs::NotRegularFile { .. } => ErrorKind::Io,
        Fs::OutsideRoot { .. }
        | Fs::InvalidPath { .. }
        | Fs::InvalidDigest { .. }
        | Fs::ArtifactParse { .. }
        | Fs::ArtifactSerialize { .. } => ErrorKind::InvalidInput,
        Fs::AlreadyExists { .. } => ErrorKind::Conflict,
    }
}
