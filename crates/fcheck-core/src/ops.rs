//! Top-level operations: generate, check and pack
//!
//! Each operation runs in two steps. `prepare_*` validates inputs and
//! outputs without touching the filesystem and reports whether an existing
//! output will be replaced; `run` then does the work. The `generate`,
//! `check` and `pack` shorthands do both. Artifacts are written only after
//! the work has fully succeeded.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fcheck_fs::FileIdentity;

use crate::diff::Diff;
use crate::manifest::{Manifest, ManifestBuilder};
use crate::options::{CheckOptions, GenerateOptions, PackOptions};
use crate::pack::{PackReport, Packager, ensure_not_nesting};
use crate::reconcile::{Reconciler, Reconciliation};
use crate::{Error, Result};

/// Result of [`generate`].
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub manifest: Manifest,
    pub output: PathBuf,
    /// An existing manifest was replaced
    pub replaced: bool,
}

/// Result of [`check`].
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Capture time of the manifest that was checked
    pub manifest_time: i64,
    pub reconciliation: Reconciliation,
    /// Where the diff was written; `None` when every file passed
    pub diff_path: Option<PathBuf>,
    /// An existing diff file was in the way
    pub replaced: bool,
}

/// Result of [`pack`].
#[derive(Debug, Clone)]
pub struct PackOutcome {
    /// Production time of the diff that was packed
    pub diff_time: i64,
    pub report: PackReport,
    pub output_dir: PathBuf,
    /// An existing package directory was deleted first
    pub replaced: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Existing {
    Absent,
    File,
    Dir,
}

fn inspect(path: &Path) -> Result<Existing> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(Existing::Dir),
        Ok(_) => Ok(Existing::File),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Existing::Absent),
        Err(e) => Err(fcheck_fs::Error::io(path, e).into()),
    }
}

fn require_dir(path: &Path) -> Result<()> {
    match inspect(path)? {
        Existing::Dir => Ok(()),
        Existing::Absent => Err(Error::DirectoryNotFound {
            path: path.to_path_buf(),
        }),
        Existing::File => Err(Error::WrongInputType {
            path: path.to_path_buf(),
            expected: "a directory",
            found: "a file",
        }),
    }
}

fn require_input_file(path: &Path) -> Result<()> {
    match inspect(path)? {
        Existing::File => Ok(()),
        Existing::Absent => Err(Error::InputNotFound {
            path: path.to_path_buf(),
        }),
        Existing::Dir => Err(Error::WrongInputType {
            path: path.to_path_buf(),
            expected: "a file",
            found: "a directory",
        }),
    }
}

/// Check that `path` may be written as an output file.
///
/// Returns whether a previous file is about to be replaced.
fn claim_output_file(path: &Path, overwrite: bool) -> Result<bool> {
    match inspect(path)? {
        Existing::Absent => Ok(false),
        Existing::Dir => Err(Error::WrongPathType {
            path: path.to_path_buf(),
            expected: "a file",
            found: "a directory",
        }),
        Existing::File if !overwrite => Err(Error::OverwriteNotConfirmed {
            path: path.to_path_buf(),
        }),
        Existing::File => Ok(true),
    }
}

/// Check that `path` may be used as the package directory.
fn claim_output_dir(path: &Path, overwrite: bool) -> Result<bool> {
    match inspect(path)? {
        Existing::Absent => Ok(false),
        Existing::File => Err(Error::WrongPathType {
            path: path.to_path_buf(),
            expected: "a directory",
            found: "a file",
        }),
        Existing::Dir if !overwrite => Err(Error::RepackNotConfirmed {
            path: path.to_path_buf(),
        }),
        Existing::Dir => Ok(true),
    }
}

/// A validated generate run.
#[derive(Debug)]
pub struct GeneratePlan {
    work_dir: PathBuf,
    output: PathBuf,
    stale: Option<FileIdentity>,
}

impl GeneratePlan {
    /// The manifest file to be written.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// True if an existing manifest will be overwritten.
    pub fn replaces(&self) -> bool {
        self.stale.is_some()
    }

    pub fn run(self) -> Result<GenerateOutcome> {
        let replaced = self.replaces();
        let mut builder = ManifestBuilder::new(&self.work_dir);
        if let Some(stale) = self.stale {
            tracing::info!(path = %self.output.display(), "output file exists, will be overwritten");
            // The stale manifest may sit inside the tree being snapshotted
            builder = builder.skip_file(stale);
        }
        let manifest = builder.build()?;
        manifest.save(&self.output)?;

        Ok(GenerateOutcome {
            manifest,
            output: self.output,
            replaced,
        })
    }
}

/// Validate a generate run.
pub fn prepare_generate(opts: &GenerateOptions) -> Result<GeneratePlan> {
    require_dir(&opts.work_dir)?;
    let stale = if claim_output_file(&opts.output, opts.overwrite)? {
        Some(FileIdentity::of(&opts.output)?)
    } else {
        None
    };
    Ok(GeneratePlan {
        work_dir: opts.work_dir.clone(),
        output: opts.output.clone(),
        stale,
    })
}

/// Snapshot `work_dir` into a manifest file.
pub fn generate(opts: &GenerateOptions) -> Result<GenerateOutcome> {
    prepare_generate(opts)?.run()
}

/// A validated check run, holding the parsed manifest.
#[derive(Debug)]
pub struct CheckPlan {
    work_dir: PathBuf,
    output: PathBuf,
    manifest: Manifest,
    manifest_identity: FileIdentity,
    replaces: bool,
}

impl CheckPlan {
    /// The diff file that may be written.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// True if an existing diff file is in the way.
    pub fn replaces(&self) -> bool {
        self.replaces
    }

    /// Capture time of the manifest being checked.
    pub fn manifest_time(&self) -> i64 {
        self.manifest.captured_at
    }

    /// Reconcile and write the diff, unless every file passed.
    pub fn run(self) -> Result<CheckOutcome> {
        if self.replaces {
            tracing::info!(path = %self.output.display(), "output file exists, will be overwritten");
        }
        let reconciliation = Reconciler::new(&self.work_dir, &self.manifest)
            .skip_file(self.manifest_identity)
            .run()?;

        let diff_path = if reconciliation.is_clean() {
            None
        } else {
            reconciliation.diff.save(&self.output)?;
            Some(self.output)
        };

        Ok(CheckOutcome {
            manifest_time: self.manifest.captured_at,
            reconciliation,
            diff_path,
            replaced: self.replaces,
        })
    }
}

/// Validate a check run and load its manifest.
pub fn prepare_check(opts: &CheckOptions) -> Result<CheckPlan> {
    require_dir(&opts.work_dir)?;
    require_input_file(&opts.manifest)?;
    let manifest_identity = FileIdentity::of(&opts.manifest)?;
    let manifest = Manifest::load(&opts.manifest)?;
    let replaces = claim_output_file(&opts.output, opts.overwrite)?;

    Ok(CheckPlan {
        work_dir: opts.work_dir.clone(),
        output: opts.output.clone(),
        manifest,
        manifest_identity,
        replaces,
    })
}

/// Reconcile `work_dir` against a manifest and record the differences.
pub fn check(opts: &CheckOptions) -> Result<CheckOutcome> {
    prepare_check(opts)?.run()
}

/// A validated pack run, holding the parsed diff.
#[derive(Debug)]
pub struct PackPlan {
    work_dir: PathBuf,
    output_dir: PathBuf,
    diff: Diff,
    replaces: bool,
}

impl PackPlan {
    /// The package directory to be created.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// True if an existing package directory will be deleted.
    pub fn replaces(&self) -> bool {
        self.replaces
    }

    /// Production time of the diff being packed.
    pub fn diff_time(&self) -> i64 {
        self.diff.produced_at
    }

    /// Delete any previous package and build the new one.
    pub fn run(self) -> Result<PackOutcome> {
        if self.replaces {
            tracing::info!(
                path = %self.output_dir.display(),
                "output directory exists, will be deleted and repacked"
            );
            fs::remove_dir_all(&self.output_dir)
                .map_err(|e| fcheck_fs::Error::io(&self.output_dir, e))?;
        }

        let report = Packager::new(&self.work_dir, &self.output_dir).pack(&self.diff)?;

        Ok(PackOutcome {
            diff_time: self.diff.produced_at,
            report,
            output_dir: self.output_dir,
            replaced: self.replaces,
        })
    }
}

/// Validate a pack run and load its diff.
///
/// The nesting check happens here, before anything can be removed.
pub fn prepare_pack(opts: &PackOptions) -> Result<PackPlan> {
    require_dir(&opts.work_dir)?;
    require_input_file(&opts.diff)?;
    let diff = Diff::load(&opts.diff)?;
    ensure_not_nesting(&opts.work_dir, &opts.output_dir)?;
    let replaces = claim_output_dir(&opts.output_dir, opts.overwrite)?;

    Ok(PackPlan {
        work_dir: opts.work_dir.clone(),
        output_dir: opts.output_dir.clone(),
        diff,
        replaces,
    })
}

/// Build a repair package from a diff file.
pub fn pack(opts: &PackOptions) -> Result<PackOutcome> {
    prepare_pack(opts)?.run()
}
