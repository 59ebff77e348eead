//! Reconciliation results as a persisted artifact

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use fcheck_fs::{SerializablePath, artifact};
use serde::{Deserialize, Serialize};

use crate::nullable::null_as_default;
use crate::{Error, Result};

/// Which of the three diff sets a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Present in manifest and on disk, content or size differs
    Mismatching,
    /// In the manifest, not on disk
    Missing,
    /// On disk, not in the manifest
    Redundant,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mismatching => "mismatching",
            Self::Missing => "missing",
            Self::Redundant => "redundant",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paths that failed reconciliation, grouped into three disjoint sets.
///
/// Passing files are counted by the reconciler but never named here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    /// When reconciliation finished, Unix seconds
    #[serde(rename = "time")]
    pub produced_at: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mismatching: BTreeSet<SerializablePath>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing: BTreeSet<SerializablePath>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub redundant: BTreeSet<SerializablePath>,
}

impl Diff {
    pub fn new(produced_at: i64) -> Self {
        Self {
            produced_at,
            ..Self::default()
        }
    }

    /// True when no path is in any set.
    pub fn is_clean(&self) -> bool {
        self.mismatching.is_empty() && self.missing.is_empty() && self.redundant.is_empty()
    }

    /// Total number of classified paths.
    pub fn len(&self) -> usize {
        self.mismatching.len() + self.missing.len() + self.redundant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_clean()
    }

    /// The set for `category`.
    pub fn paths(&self, category: Category) -> &BTreeSet<SerializablePath> {
        match category {
            Category::Mismatching => &self.mismatching,
            Category::Missing => &self.missing,
            Category::Redundant => &self.redundant,
        }
    }

    /// First path found in more than one set.
    pub fn overlap(&self) -> Option<&SerializablePath> {
        self.mismatching
            .intersection(&self.missing)
            .chain(self.mismatching.intersection(&self.redundant))
            .chain(self.missing.intersection(&self.redundant))
            .next()
    }

    /// Load a diff artifact, rejecting overlapping sets.
    pub fn load(path: &Path) -> Result<Self> {
        let diff: Self = artifact::load(path)?;
        if let Some(shared) = diff.overlap() {
            return Err(Error::InvalidArtifact {
                artifact: "Diff",
                path: path.to_path_buf(),
                message: format!("'{shared}' is listed in more than one set"),
            });
        }
        Ok(diff)
    }

    /// Atomically write the diff as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        artifact::save(path, self)?;
        Ok(())
    }
}
