//! Repair packages
//!
//! A package holds copies of every mismatching and missing file, laid out
//! under the same relative paths as the source tree, plus a removal script
//! for redundant files. Packing is not atomic: files copied before a
//! failure stay in place.

use std::path::{Path, PathBuf};

use fcheck_fs::{SerializablePath, io, path};

use crate::diff::{Category, Diff};
use crate::script::ScriptFlavor;
use crate::{Error, Result};

/// What a successful pack produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackReport {
    /// Copied paths in copy order
    pub copied: Vec<SerializablePath>,
    /// Location of the removal script, if one was needed
    pub script: Option<PathBuf>,
}

/// Fail unless `output` lies outside `root`.
///
/// An output directory equal to or above the source would let a later
/// cleanup of the package delete the source tree.
pub fn ensure_not_nesting(root: &Path, output: &Path) -> Result<()> {
    if path::is_same_or_ancestor(output, root)? {
        return Err(Error::OutputNestsSource {
            output: output.to_path_buf(),
            source_dir: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Copies diff entries from a source tree into a package directory.
#[derive(Debug, Clone)]
pub struct Packager {
    root: PathBuf,
    output: PathBuf,
    flavor: ScriptFlavor,
}

impl Packager {
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            flavor: ScriptFlavor::native(),
        }
    }

    /// Override the removal script dialect.
    pub fn with_flavor(mut self, flavor: ScriptFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Build the package for `diff`.
    ///
    /// Mismatching files are copied before missing ones. The first failure
    /// aborts; the removal script is written only after every copy succeeded.
    pub fn pack(&self, diff: &Diff) -> Result<PackReport> {
        ensure_not_nesting(&self.root, &self.output)?;
        let _span = tracing::info_span!(
            "pack",
            root = %self.root.display(),
            output = %self.output.display()
        )
        .entered();

        let mut report = PackReport::default();
        for category in [Category::Mismatching, Category::Missing] {
            for rel in diff.paths(category) {
                io::copy_file_with_path(&rel.resolve(&self.root), &rel.resolve(&self.output))
                    .map_err(|source| Error::Copy {
                        category: category.as_str(),
                        path: rel.clone(),
                        source,
                    })?;
                report.copied.push(rel.clone());
            }
        }

        if !diff.redundant.is_empty() {
            report.script = Some(self.write_script(diff)?);
        }

        tracing::info!(
            copied = report.copied.len(),
            redundant = diff.redundant.len(),
            "package written"
        );
        Ok(report)
    }

    fn write_script(&self, diff: &Diff) -> Result<PathBuf> {
        io::create_dir(&self.output)?;

        let script_path = self.output.join(self.flavor.file_name(diff.produced_at));
        let body = self.flavor.render(&diff.redundant);
        io::write_new(&script_path, body.as_bytes()).map_err(|e| match e {
            fcheck_fs::Error::AlreadyExists { path } => Error::ScriptExists { path },
            other => other.into(),
        })?;
        io::make_executable(&script_path)?;

        tracing::debug!(path = %script_path.display(), "removal script written");
        Ok(script_path)
    }
}

/// Package `diff` from `root` into `output` with the host's script dialect.
pub fn pack(root: &Path, diff: &Diff, output: &Path) -> Result<PackReport> {
    Packager::new(root, output).pack(diff)
}
