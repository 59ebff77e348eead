//! Reconciliation of a stored manifest against a live directory
//!
//! Every path ends up in exactly one of four outcomes. Paths found on disk
//! are decided first (unknown -> redundant, gone -> missing, changed ->
//! mismatching, otherwise pass); manifest paths never seen during the walk
//! are then reported missing.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::PathBuf;

use fcheck_fs::{FileIdentity, SerializablePath, checksum};
use serde::Serialize;

use crate::diff::Diff;
use crate::manifest::{Manifest, ManifestEntry};
use crate::walk::regular_files;
use crate::{Result, timestamp};

/// Per-file outcome of reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileStatus {
    Pass,
    Mismatch,
    NotFound,
    Redundant,
}

impl FileStatus {
    /// Console label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Mismatch => "MISMATCH",
            Self::NotFound => "NOT FOUND",
            Self::Redundant => "REDUNDANT",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Width of the widest status label.
pub const MAX_LABEL_LEN: usize = 9;

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full result of one reconciliation run.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Files present and identical in content and size
    pub pass_count: usize,
    /// Files that did not pass, grouped by outcome
    pub diff: Diff,
    /// Every classified path in the order it was decided
    pub statuses: Vec<(SerializablePath, FileStatus)>,
}

impl Reconciliation {
    /// True when every file passed.
    pub fn is_clean(&self) -> bool {
        self.diff.is_clean()
    }
}

/// Compares a [`Manifest`] against the files under a root directory.
#[derive(Debug)]
pub struct Reconciler<'a> {
    root: PathBuf,
    manifest: &'a Manifest,
    skip: Option<FileIdentity>,
}

impl<'a> Reconciler<'a> {
    pub fn new(root: impl Into<PathBuf>, manifest: &'a Manifest) -> Self {
        Self {
            root: root.into(),
            manifest,
            skip: None,
        }
    }

    /// Ignore the file with this identity while walking.
    ///
    /// Used for the manifest artifact itself when it lives inside the tree,
    /// whatever it happens to be named.
    pub fn skip_file(mut self, identity: FileIdentity) -> Self {
        self.skip = Some(identity);
        self
    }

    /// Walk the root and classify every file.
    ///
    /// A traversal or read failure discards all partial results.
    pub fn run(&self) -> Result<Reconciliation> {
        let _span = tracing::info_span!("reconcile", root = %self.root.display()).entered();

        let lookup: HashMap<&SerializablePath, &ManifestEntry> = self
            .manifest
            .entries
            .iter()
            .map(|entry| (&entry.path, entry))
            .collect();
        let mut unconfirmed: BTreeSet<&SerializablePath> = lookup.keys().copied().collect();

        let mut pass_count = 0;
        let mut diff = Diff::default();
        let mut statuses = Vec::new();

        for file in regular_files(&self.root, self.skip.as_ref()) {
            let file = file?;
            let path = SerializablePath::from_native(&self.root, &file.path)?;

            let status = match lookup.get(&path) {
                None => FileStatus::Redundant,
                Some(entry) => {
                    unconfirmed.remove(&path);
                    let comparison = checksum::compare(&file.path, &entry.digest)?;
                    if !comparison.exists {
                        FileStatus::NotFound
                    } else if !comparison.matches || file.metadata.len() != entry.size {
                        FileStatus::Mismatch
                    } else {
                        FileStatus::Pass
                    }
                }
            };

            tracing::debug!(path = %path, status = %status, "classified");
            match status {
                FileStatus::Pass => pass_count += 1,
                FileStatus::Mismatch => {
                    diff.mismatching.insert(path.clone());
                }
                FileStatus::NotFound => {
                    diff.missing.insert(path.clone());
                }
                FileStatus::Redundant => {
                    diff.redundant.insert(path.clone());
                }
            }
            statuses.push((path, status));
        }

        for path in unconfirmed {
            tracing::debug!(path = %path, "never seen on disk");
            diff.missing.insert(path.clone());
            statuses.push((path.clone(), FileStatus::NotFound));
        }

        diff.produced_at = timestamp::now();
        tracing::info!(
            passed = pass_count,
            mismatching = diff.mismatching.len(),
            missing = diff.missing.len(),
            redundant = diff.redundant.len(),
            "reconciliation finished"
        );

        Ok(Reconciliation {
            pass_count,
            diff,
            statuses,
        })
    }
}

/// Reconcile `manifest` against the files under `root`.
pub fn reconcile(root: impl Into<PathBuf>, manifest: &Manifest) -> Result<Reconciliation> {
    Reconciler::new(root, manifest).run()
}
