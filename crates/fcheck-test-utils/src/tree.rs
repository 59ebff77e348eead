//! [`TestTree`] builder for directory-audit test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a source tree plus room for artifacts.
///
/// The tree to audit lives under `src/` so manifests, diffs and packages
/// can be written next to it without being walked.
///
/// # Example
///
/// ```rust,no_run
/// use fcheck_test_utils::TestTree;
///
/// let tree = TestTree::new()
///     .with_file("a.txt", "alpha")
///     .with_file("dir/b.txt", "beta");
/// tree.assert_file_exists("dir/b.txt");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
    source: PathBuf,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty source tree.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        fs::create_dir(&source).unwrap();
        Self { temp_dir, source }
    }

    /// Builder form of [`TestTree::write`].
    pub fn with_file(self, rel: &str, content: impl AsRef<[u8]>) -> Self {
        self.write(rel, content);
        self
    }

    /// The directory being audited.
    pub fn root(&self) -> &Path {
        &self.source
    }

    /// Scratch space outside the audited tree, for artifacts.
    pub fn scratch(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `name` inside the scratch space.
    pub fn artifact(&self, name: &str) -> PathBuf {
        self.scratch().join(name)
    }

    /// Absolute path of `rel` inside the source tree.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.source.join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: impl AsRef<[u8]>) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }

    /// Delete the file at `rel`.
    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.path(rel))
            .unwrap_or_else(|e| panic!("Could not remove {rel}: {e}"));
    }

    /// Read the file at `path` (absolute) as UTF-8.
    pub fn read(path: &Path) -> String {
        fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `rel` exists in the source tree.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `rel` does **not** exist in the source tree.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (absolute) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_contains(path: &Path, content: &str) {
        let file_content = Self::read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path.display(),
            content,
            file_content
        );
    }
}
