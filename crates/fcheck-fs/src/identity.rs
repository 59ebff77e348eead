//! Filesystem identity of a file, independent of its name

use std::fs::Metadata;
use std::path::Path;

use crate::{Error, Result};

/// Identifies one file on disk.
///
/// On Unix this is the device and inode pair, so a renamed or hard-linked
/// file keeps its identity. Elsewhere the canonical path is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileIdentity {
    #[cfg(unix)]
    dev: u64,
    #[cfg(unix)]
    ino: u64,
    #[cfg(not(unix))]
    canonical: std::path::PathBuf,
}

impl FileIdentity {
    /// Identity of the file at `path`, following symlinks.
    pub fn of(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
        Self::from_metadata(path, &meta)
    }

    /// Identity from already-fetched metadata for `path`.
    #[cfg(unix)]
    pub fn from_metadata(_path: &Path, meta: &Metadata) -> Result<Self> {
        use std::os::unix::fs::MetadataExt;

        Ok(Self {
            dev: meta.dev(),
            ino: meta.ino(),
        })
    }

    /// Identity from already-fetched metadata for `path`.
    #[cfg(not(unix))]
    pub fn from_metadata(path: &Path, _meta: &Metadata) -> Result<Self> {
        let canonical = dunce::canonicalize(path).map_err(|e| Error::io(path, e))?;
        Ok(Self { canonical })
    }
}
