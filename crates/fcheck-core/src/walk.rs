//! Regular-file traversal shared by the builder and the reconciler

use std::fs::Metadata;
use std::path::{Path, PathBuf};

use fcheck_fs::FileIdentity;
use walkdir::WalkDir;

use crate::{Error, Result};

/// A regular file found under the walk root.
#[derive(Debug)]
pub(crate) struct WalkedFile {
    pub path: PathBuf,
    pub metadata: Metadata,
}

/// Iterate the regular files under `root` in lexical order.
///
/// Symlinks are not followed and are skipped along with directories and
/// special files. A file whose identity equals `skip` is left out. The
/// first traversal error is yielded and ends the useful part of the walk.
pub(crate) fn regular_files<'a>(
    root: &'a Path,
    skip: Option<&'a FileIdentity>,
) -> impl Iterator<Item = Result<WalkedFile>> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(Error::Walk {
                        path: root.to_path_buf(),
                        source,
                    }));
                }
            };
            if !entry.file_type().is_file() {
                return None;
            }
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(source) => {
                    return Some(Err(Error::Walk {
                        path: root.to_path_buf(),
                        source,
                    }));
                }
            };
            if let Some(skip) = skip {
                match FileIdentity::from_metadata(entry.path(), &metadata) {
                    Ok(identity) if &identity == skip => {
                        tracing::debug!(path = %entry.path().display(), "skipping input artifact");
                        return None;
                    }
                    Ok(_) => {}
                    Err(e) => return Some(Err(e.into())),
                }
            }
            Some(Ok(WalkedFile {
                path: entry.into_path(),
                metadata,
            }))
        })
}
