//! Reconciliation of manifests against live directories

use std::collections::BTreeSet;

use fcheck_core::{
    ErrorKind, FileStatus, Manifest, ManifestEntry, Reconciler, manifest, reconcile,
};
use fcheck_fs::{FileIdentity, SerializablePath, checksum};
use fcheck_test_utils::TestTree;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn set(paths: &[&str]) -> BTreeSet<SerializablePath> {
    paths
        .iter()
        .map(|p| SerializablePath::parse(*p).unwrap())
        .collect()
}

#[test]
fn untouched_tree_passes_every_file() {
    let tree = TestTree::new()
        .with_file("a.txt", "hi")
        .with_file("dir/b.txt", "bye");
    let snapshot = manifest::build(tree.root()).unwrap();

    let result = reconcile::reconcile(tree.root(), &snapshot).unwrap();

    assert!(result.is_clean());
    assert_eq!(result.pass_count, 2);
    assert!(
        result
            .statuses
            .iter()
            .all(|(_, status)| *status == FileStatus::Pass)
    );
}

#[test]
fn reconciliation_is_idempotent() {
    let tree = TestTree::new().with_file("a.txt", "hi");
    let snapshot = manifest::build(tree.root()).unwrap();
    tree.write("a.txt", "changed");
    tree.write("extra.txt", "new");

    let first = reconcile::reconcile(tree.root(), &snapshot).unwrap();
    let second = reconcile::reconcile(tree.root(), &snapshot).unwrap();

    assert_eq!(first.pass_count, second.pass_count);
    assert_eq!(first.diff.mismatching, second.diff.mismatching);
    assert_eq!(first.diff.missing, second.diff.missing);
    assert_eq!(first.diff.redundant, second.diff.redundant);
    assert_eq!(first.statuses, second.statuses);
}

#[test]
fn modified_deleted_and_added_files_are_classified() {
    let tree = TestTree::new()
        .with_file("a.txt", "hi")
        .with_file("b.txt", "bye");
    let snapshot = manifest::build(tree.root()).unwrap();
    assert_eq!(snapshot.len(), 2);

    tree.remove("b.txt");
    tree.write("a.txt", "hey");
    tree.write("c.txt", "new");

    let result = reconcile::reconcile(tree.root(), &snapshot).unwrap();

    assert_eq!(result.pass_count, 0);
    assert_eq!(result.diff.mismatching, set(&["a.txt"]));
    assert_eq!(result.diff.missing, set(&["b.txt"]));
    assert_eq!(result.diff.redundant, set(&["c.txt"]));
    assert!(result.diff.overlap().is_none());
}

#[test]
fn same_digest_with_different_size_is_mismatching() {
    let tree = TestTree::new().with_file("a.txt", "hi");
    let snapshot = Manifest {
        captured_at: 1,
        entries: vec![ManifestEntry {
            path: SerializablePath::parse("a.txt").unwrap(),
            digest: checksum::digest_bytes(b"hi"),
            size: 3,
        }],
    };

    let result = reconcile::reconcile(tree.root(), &snapshot).unwrap();

    assert_eq!(result.pass_count, 0);
    assert_eq!(result.diff.mismatching, set(&["a.txt"]));
}

#[rstest]
#[case::truncated("2aae6c35", false)]
#[case::uppercase("2AAE6C35C94FCFB415DBE95F408B9CE91EE846ED", true)]
fn recorded_digest_is_compared_as_bytes(#[case] digest: &str, #[case] passes: bool) {
    let tree = TestTree::new().with_file("a.txt", "hello world");
    let snapshot = Manifest {
        captured_at: 1,
        entries: vec![ManifestEntry {
            path: SerializablePath::parse("a.txt").unwrap(),
            digest: digest.to_string(),
            size: 11,
        }],
    };

    let result = reconcile::reconcile(tree.root(), &snapshot).unwrap();

    assert_eq!(result.pass_count == 1, passes);
    assert_eq!(result.diff.mismatching.is_empty(), passes);
}

#[test]
fn malformed_digest_is_invalid_input() {
    let tree = TestTree::new().with_file("a.txt", "hi");
    let snapshot = Manifest {
        captured_at: 1,
        entries: vec![ManifestEntry {
            path: SerializablePath::parse("a.txt").unwrap(),
            digest: "not-hex".to_string(),
            size: 2,
        }],
    };

    let err = reconcile::reconcile(tree.root(), &snapshot).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn every_path_lands_in_exactly_one_outcome() {
    let tree = TestTree::new()
        .with_file("keep.txt", "same")
        .with_file("edit.txt", "v1")
        .with_file("gone.txt", "bye")
        .with_file("dir/nested.txt", "n");
    let snapshot = manifest::build(tree.root()).unwrap();
    tree.write("edit.txt", "v2");
    tree.remove("gone.txt");
    tree.write("dir/added.txt", "a");

    let result = reconcile::reconcile(tree.root(), &snapshot).unwrap();

    let mut seen = BTreeSet::new();
    for (path, _) in &result.statuses {
        assert!(seen.insert(path.clone()), "{path} classified twice");
    }
    assert_eq!(
        seen,
        set(&[
            "keep.txt",
            "edit.txt",
            "gone.txt",
            "dir/nested.txt",
            "dir/added.txt"
        ])
    );
    assert_eq!(result.pass_count, 2);
    assert_eq!(result.diff.len(), 3);
    assert!(result.diff.overlap().is_none());
}

#[test]
fn missing_paths_are_reported_after_the_walk() {
    let tree = TestTree::new()
        .with_file("a.txt", "a")
        .with_file("z.txt", "z");
    let snapshot = manifest::build(tree.root()).unwrap();
    tree.remove("a.txt");

    let result = reconcile::reconcile(tree.root(), &snapshot).unwrap();

    let order: Vec<_> = result
        .statuses
        .iter()
        .map(|(p, s)| (p.as_str(), *s))
        .collect();
    assert_eq!(
        order,
        vec![("z.txt", FileStatus::Pass), ("a.txt", FileStatus::NotFound)]
    );
}

#[test]
fn manifest_inside_tree_is_skipped_by_identity() {
    let tree = TestTree::new().with_file("a.txt", "hi");
    let snapshot = manifest::build(tree.root()).unwrap();
    let stored = tree.path("renamed-manifest.json");
    snapshot.save(&stored).unwrap();

    let result = Reconciler::new(tree.root(), &snapshot)
        .skip_file(FileIdentity::of(&stored).unwrap())
        .run()
        .unwrap();

    assert!(result.is_clean());
    assert_eq!(result.pass_count, 1);
}

#[test]
fn empty_manifest_marks_everything_redundant() {
    let tree = TestTree::new()
        .with_file("a.txt", "a")
        .with_file("b/c.txt", "c");
    let snapshot = Manifest {
        captured_at: 1,
        entries: Vec::new(),
    };

    let result = reconcile::reconcile(tree.root(), &snapshot).unwrap();
    assert_eq!(result.diff.redundant, set(&["a.txt", "b/c.txt"]));
    assert_eq!(result.pass_count, 0);
}

#[test]
fn diff_time_is_set_when_reconciliation_finishes() {
    let tree = TestTree::new().with_file("a.txt", "a");
    let snapshot = manifest::build(tree.root()).unwrap();
    let result = reconcile::reconcile(tree.root(), &snapshot).unwrap();
    assert!(result.diff.produced_at >= snapshot.captured_at);
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    fn is_root() -> bool {
        match std::process::Command::new("id").arg("-u").output() {
            Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
            Err(_) => false,
        }
    }

    #[test]
    fn unreadable_subdirectory_aborts_reconciliation() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let tree = TestTree::new()
            .with_file("a.txt", "hi")
            .with_file("locked/b.txt", "bye");
        let snapshot = manifest::build(tree.root()).unwrap();
        fs::set_permissions(tree.path("locked"), Permissions::from_mode(0o000)).unwrap();

        let result = reconcile::reconcile(tree.root(), &snapshot);

        fs::set_permissions(tree.path("locked"), Permissions::from_mode(0o755)).unwrap();
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Io);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_name_aborts_reconciliation() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tree = TestTree::new().with_file("a.txt", "hi");
        let snapshot = manifest::build(tree.root()).unwrap();
        fs::write(tree.root().join(OsStr::from_bytes(b"bad\xff.txt")), "x").unwrap();

        let err = reconcile::reconcile(tree.root(), &snapshot).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
