//! Directory snapshots
//!
//! A [`Manifest`] records the path, SHA-1 digest and size of every regular
//! file under a root directory at the moment it was built.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use fcheck_fs::{FileIdentity, SerializablePath, artifact, checksum};
use serde::{Deserialize, Serialize};

use crate::nullable::null_as_default;
use crate::walk::regular_files;
use crate::{Error, Result, timestamp};

/// One file in a directory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Root-relative path with forward slashes
    pub path: SerializablePath,
    /// Lowercase hex SHA-1 of the content
    #[serde(rename = "sha1")]
    pub digest: String,
    /// Size in bytes
    pub size: u64,
}

/// A timestamped snapshot of a directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// When the build started, Unix seconds
    #[serde(rename = "time")]
    pub captured_at: i64,
    /// Entries in traversal order; paths are unique
    #[serde(rename = "files", default, deserialize_with = "null_as_default")]
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Number of recorded files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the snapshot recorded no files.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a manifest artifact, rejecting duplicate paths and digests that
    /// are not lowercase hex SHA-1.
    pub fn load(path: &Path) -> Result<Self> {
        let manifest: Self = artifact::load(path)?;

        let mut seen = HashSet::with_capacity(manifest.entries.len());
        for entry in &manifest.entries {
            if !checksum::is_valid_digest(&entry.digest) {
                return Err(Error::InvalidArtifact {
                    artifact: "Manifest",
                    path: path.to_path_buf(),
                    message: format!(
                        "entry '{}' has digest '{}', expected {} lowercase hex digits",
                        entry.path,
                        entry.digest,
                        checksum::DIGEST_HEX_LEN
                    ),
                });
            }
            if !seen.insert(&entry.path) {
                return Err(Error::InvalidArtifact {
                    artifact: "Manifest",
                    path: path.to_path_buf(),
                    message: format!("duplicate entry for '{}'", entry.path),
                });
            }
        }

        Ok(manifest)
    }

    /// Atomically write the manifest as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        artifact::save(path, self)?;
        Ok(())
    }
}

/// Builds a [`Manifest`] by walking and hashing a directory.
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    root: PathBuf,
    skip: Option<FileIdentity>,
}

impl ManifestBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            skip: None,
        }
    }

    /// Leave the file with this identity out of the snapshot.
    pub fn skip_file(mut self, identity: FileIdentity) -> Self {
        self.skip = Some(identity);
        self
    }

    /// Walk the root and hash every regular file.
    ///
    /// Any unreadable file or directory aborts the whole build.
    pub fn build(&self) -> Result<Manifest> {
        let captured_at = timestamp::now();
        let _span = tracing::info_span!("build_manifest", root = %self.root.display()).entered();

        let mut entries = Vec::new();
        for file in regular_files(&self.root, self.skip.as_ref()) {
            let file = file?;
            let path = SerializablePath::from_native(&self.root, &file.path)?;
            let digest = checksum::digest(&file.path)?;
            tracing::debug!(path = %path, digest = %digest, "hashed file");

            entries.push(ManifestEntry {
                path,
                digest,
                size: file.metadata.len(),
            });
        }

        tracing::info!(files = entries.len(), "manifest built");
        Ok(Manifest {
            captured_at,
            entries,
        })
    }
}

/// Snapshot every regular file under `root`.
pub fn build(root: &Path) -> Result<Manifest> {
    ManifestBuilder::new(root).build()
}
