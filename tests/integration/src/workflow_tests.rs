//! Full audit-and-repair workflow across the workspace crates
//!
//! generate -> drift -> check -> pack -> apply package -> check again.

use std::fs;
use std::path::Path;

use fcheck_core::options::{CheckOptions, GenerateOptions, PackOptions};
use fcheck_core::{Diff, Manifest, ops};
use fcheck_fs::SerializablePath;
use fcheck_test_utils::TestTree;
use pretty_assertions::assert_eq;

fn generate(work_dir: &Path, output: &Path) -> Manifest {
    ops::generate(&GenerateOptions {
        work_dir: work_dir.to_path_buf(),
        output: output.to_path_buf(),
        overwrite: false,
    })
    .unwrap()
    .manifest
}

fn check(work_dir: &Path, manifest: &Path, output: &Path) -> ops::CheckOutcome {
    ops::check(&CheckOptions {
        work_dir: work_dir.to_path_buf(),
        manifest: manifest.to_path_buf(),
        output: output.to_path_buf(),
        overwrite: true,
    })
    .unwrap()
}

/// Overlay every packaged file onto `target`, skipping removal scripts.
fn apply_copies(package: &Path, copied: &[SerializablePath], target: &Path) {
    for rel in copied {
        let dst = rel.resolve(target);
        fs::create_dir_all(dst.parent().unwrap()).unwrap();
        fs::copy(rel.resolve(package), dst).unwrap();
    }
}

#[test]
fn reference_tree_repairs_a_drifted_copy() {
    // The reference tree is the known-good source a package is built from
    let reference = TestTree::new()
        .with_file("bin/tool", "v2")
        .with_file("lib/core.dat", "core")
        .with_file("readme.md", "docs");
    let target = TestTree::new()
        .with_file("bin/tool", "v2")
        .with_file("lib/core.dat", "core")
        .with_file("readme.md", "docs");

    let manifest_path = reference.artifact("f.json");
    let manifest = generate(reference.root(), &manifest_path);
    assert_eq!(manifest.len(), 3);

    // The deployed copy drifts
    target.write("bin/tool", "v1");
    target.remove("lib/core.dat");
    target.write("stale.log", "junk");

    let diff_path = target.artifact("diff.json");
    let outcome = check(target.root(), &manifest_path, &diff_path);
    assert_eq!(outcome.reconciliation.pass_count, 1);
    let diff = Diff::load(&diff_path).unwrap();
    assert_eq!(diff.len(), 3);

    // Package from the reference tree, which still has every missing file
    let package = reference.artifact("diff-package");
    let packed = ops::pack(&PackOptions {
        work_dir: reference.root().to_path_buf(),
        diff: diff_path.clone(),
        output_dir: package.clone(),
        overwrite: false,
    })
    .unwrap();
    assert_eq!(packed.report.copied.len(), 2);
    assert!(packed.report.script.is_some());

    apply_copies(&package, &packed.report.copied, target.root());
    for rel in &diff.redundant {
        fs::remove_file(rel.resolve(target.root())).unwrap();
    }

    let after = check(target.root(), &manifest_path, &target.artifact("diff2.json"));
    assert!(after.reconciliation.is_clean());
    assert_eq!(after.reconciliation.pass_count, 3);
    assert!(after.diff_path.is_none());
}

#[cfg(unix)]
#[test]
fn removal_script_deletes_redundant_files() {
    let tree = TestTree::new().with_file("keep.txt", "k");
    let manifest_path = tree.artifact("f.json");
    generate(tree.root(), &manifest_path);
    tree.write("junk/it's here.tmp", "x");
    tree.write("other.tmp", "y");

    let diff_path = tree.artifact("diff.json");
    check(tree.root(), &manifest_path, &diff_path);

    let package = tree.artifact("pkg");
    let packed = ops::pack(&PackOptions {
        work_dir: tree.root().to_path_buf(),
        diff: diff_path,
        output_dir: package,
        overwrite: false,
    })
    .unwrap();
    let script = packed.report.script.unwrap();

    let status = std::process::Command::new("sh")
        .arg(&script)
        .current_dir(tree.root())
        .status()
        .unwrap();
    assert!(status.success());

    tree.assert_file_exists("keep.txt");
    tree.assert_file_not_exists("junk/it's here.tmp");
    tree.assert_file_not_exists("other.tmp");
}

#[test]
fn artifacts_are_tab_indented_json() {
    let tree = TestTree::new().with_file("a.txt", "hi");
    let manifest_path = tree.artifact("f.json");
    generate(tree.root(), &manifest_path);

    let text = TestTree::read(&manifest_path);
    assert!(text.starts_with("{\n\t\"time\": "), "got: {text}");

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["files"][0]["path"], "a.txt");
    assert_eq!(value["files"][0]["size"], 2);
    assert_eq!(
        value["files"][0]["sha1"],
        "c22b5f9178342609428d6f51b2c5af4c0bde6a42"
    );
}

#[test]
fn diff_files_from_older_tools_are_accepted() {
    let tree = TestTree::new().with_file("a.txt", "hi");
    let diff_path = tree.artifact("diff.json");
    fs::write(
        &diff_path,
        "{\n\t\"time\": 1600000000,\n\t\"mismatching\": [\n\t\t\"a.txt\"\n\t],\n\t\"missing\": null,\n\t\"redundant\": null\n}",
    )
    .unwrap();

    let package = tree.artifact("pkg");
    let packed = ops::pack(&PackOptions {
        work_dir: tree.root().to_path_buf(),
        diff: diff_path,
        output_dir: package.clone(),
        overwrite: false,
    })
    .unwrap();

    assert_eq!(packed.diff_time, 1_600_000_000);
    assert!(packed.report.script.is_none());
    assert_eq!(TestTree::read(&package.join("a.txt")), "hi");
}
