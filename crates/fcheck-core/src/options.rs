//! Explicit run configuration
//!
//! The shell resolves flags and defaults into one of these structs and
//! passes it to [`crate::ops`]; nothing is read from process-wide state.

use std::path::PathBuf;

/// The three mutually exclusive modes of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Build a manifest from a directory
    Generate,
    /// Reconcile a directory against a manifest
    Check,
    /// Build a repair package from a diff
    Pack,
}

impl Mode {
    /// Default manifest file name
    pub const MANIFEST_FILE: &'static str = "f.json";
    /// Default diff file name
    pub const DIFF_FILE: &'static str = "diff.json";
    /// Default package directory name
    pub const PACKAGE_DIR: &'static str = "diff-package";

    /// Default path of the artifact the mode reads (generate: writes).
    pub fn default_artifact(&self) -> &'static str {
        match self {
            Self::Generate | Self::Check => Self::MANIFEST_FILE,
            Self::Pack => Self::DIFF_FILE,
        }
    }

    /// Default path of what the mode writes besides its artifact.
    pub fn default_output(&self) -> &'static str {
        match self {
            Self::Generate => Self::MANIFEST_FILE,
            Self::Check => Self::DIFF_FILE,
            Self::Pack => Self::PACKAGE_DIR,
        }
    }
}

/// Options for building a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Directory to snapshot
    pub work_dir: PathBuf,
    /// Where to write the manifest
    pub output: PathBuf,
    /// Replace an existing manifest
    pub overwrite: bool,
}

/// Options for reconciling a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Directory to audit
    pub work_dir: PathBuf,
    /// Manifest to audit against
    pub manifest: PathBuf,
    /// Where to write the diff
    pub output: PathBuf,
    /// Replace an existing diff
    pub overwrite: bool,
}

/// Options for building a repair package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOptions {
    /// Directory to copy files from
    pub work_dir: PathBuf,
    /// Diff naming the files to package
    pub diff: PathBuf,
    /// Package directory to create
    pub output_dir: PathBuf,
    /// Delete and recreate an existing package directory
    pub overwrite: bool,
}

/// A fully resolved invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOptions {
    Generate(GenerateOptions),
    Check(CheckOptions),
    Pack(PackOptions),
}

impl RunOptions {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Generate(_) => Mode::Generate,
            Self::Check(_) => Mode::Check,
            Self::Pack(_) => Mode::Pack,
        }
    }
}
