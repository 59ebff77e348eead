//! Serializable path handling for cross-platform manifests
//!
//! Manifest and diff artifacts key every file by a directory-relative path
//! that always uses forward slashes. Conversion to the platform-native form
//! happens only at I/O boundaries.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A directory-relative path normalized to forward slashes.
///
/// Every instance is validated: it is never empty, never absolute, and has
/// no empty, `.` or `..` segments. Joining it onto a root therefore always
/// yields a path inside that root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializablePath {
    inner: String,
}

impl SerializablePath {
    /// Parse an already-serialized path, as read from an artifact.
    pub fn parse(path: impl Into<String>) -> Result<Self> {
        let inner = path.into();
        validate(&inner)?;
        Ok(Self { inner })
    }

    /// Build the serializable form of `file_path` relative to `root`.
    ///
    /// `file_path` must lie under `root`; anything else is rejected rather
    /// than producing a path that escapes the root.
    pub fn from_native(root: &Path, file_path: &Path) -> Result<Self> {
        let relative = file_path
            .strip_prefix(root)
            .map_err(|_| Error::OutsideRoot {
                root: root.to_path_buf(),
                path: file_path.to_path_buf(),
            })?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(segment) => {
                    let segment = segment.to_str().ok_or_else(|| {
                        Error::invalid_path(
                            file_path.to_string_lossy(),
                            "file name is not valid UTF-8",
                        )
                    })?;
                    segments.push(segment);
                }
                Component::CurDir => {}
                _ => {
                    return Err(Error::invalid_path(
                        file_path.to_string_lossy(),
                        "unexpected path component",
                    ));
                }
            }
        }

        Self::parse(segments.join("/"))
    }

    /// Get the forward-slash string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native relative PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        self.inner.split('/').collect()
    }

    /// Native path of this entry under `root`.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(self.to_native())
    }
}

fn validate(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::invalid_path(path, "path is empty"));
    }
    if path.starts_with('/') {
        return Err(Error::invalid_path(path, "path must be relative"));
    }
    for segment in path.split('/') {
        match segment {
            "" => return Err(Error::invalid_path(path, "path has an empty segment")),
            "." | ".." => {
                return Err(Error::invalid_path(path, "path has a dot segment"));
            }
            _ => {}
        }
        if cfg!(windows) && segment.contains(['\\', ':']) {
            return Err(Error::invalid_path(
                path,
                "path segment contains a reserved character",
            ));
        }
    }
    Ok(())
}

impl TryFrom<String> for SerializablePath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for SerializablePath {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<SerializablePath> for String {
    fn from(path: SerializablePath) -> Self {
        path.inner
    }
}

impl AsRef<str> for SerializablePath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for SerializablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

/// Convert a file path under `root` to its serializable form.
pub fn to_serializable(root: &Path, file_path: &Path) -> Result<SerializablePath> {
    SerializablePath::from_native(root, file_path)
}

/// Convert a serializable path back to the native relative form.
pub fn from_serializable(path: &SerializablePath) -> PathBuf {
    path.to_native()
}

/// Absolute form of `path` with `.` and `..` resolved lexically.
///
/// Symlinks are not followed and the path does not need to exist.
pub fn absolute_normalized(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| Error::io(path, e))?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// True if `ancestor` is `path` itself or one of its parent directories.
///
/// Both paths are made absolute first; the comparison is per component, so
/// `/data/out` is not considered an ancestor of `/data/output`.
pub fn is_same_or_ancestor(ancestor: &Path, path: &Path) -> Result<bool> {
    let ancestor = absolute_normalized(ancestor)?;
    let path = absolute_normalized(path)?;
    Ok(path.starts_with(&ancestor))
}
