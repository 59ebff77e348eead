use fcheck_fs::{SerializablePath, from_serializable, to_serializable};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::{Path, PathBuf};

#[test]
fn test_serializable_uses_forward_slashes() {
    let root = Path::new("root");
    let file: PathBuf = ["root", "nested", "deeper", "file.txt"].iter().collect();

    let path = to_serializable(root, &file).unwrap();
    assert_eq!(path.as_str(), "nested/deeper/file.txt");
}

#[test]
fn test_serializable_top_level_file() {
    let path = to_serializable(Path::new("/srv/data"), Path::new("/srv/data/a.txt")).unwrap();
    assert_eq!(path.as_str(), "a.txt");
}

#[test]
fn test_from_serializable_restores_native_form() {
    let path = SerializablePath::parse("a/b/c.txt").unwrap();
    let native = from_serializable(&path);
    let expected: PathBuf = ["a", "b", "c.txt"].iter().collect();
    assert_eq!(native, expected);
}

#[test]
fn test_resolve_joins_onto_root() {
    let path = SerializablePath::parse("docs/readme.md").unwrap();
    let resolved = path.resolve(Path::new("/srv/data"));
    assert_eq!(resolved, Path::new("/srv/data").join("docs").join("readme.md"));
}

#[test]
fn test_round_trip_inside_root() {
    let root = Path::new("/srv/data");
    let original = root.join("x").join("y").join("z.bin");

    let serial = to_serializable(root, &original).unwrap();
    assert_eq!(root.join(from_serializable(&serial)), original);
}

#[test]
fn test_file_outside_root_is_rejected() {
    let result = to_serializable(Path::new("/srv/data"), Path::new("/srv/other/a.txt"));
    assert!(result.is_err());
}

#[test]
fn test_sibling_with_common_prefix_is_rejected() {
    // "/srv/data2" shares a byte prefix with "/srv/data" but is not inside it
    let result = to_serializable(Path::new("/srv/data"), Path::new("/srv/data2/a.txt"));
    assert!(result.is_err());
}

#[rstest]
#[case("a.txt")]
#[case("dir/a.txt")]
#[case("dir/sub/.hidden")]
#[case("with space/file name.txt")]
#[case("unicodé/ファイル.txt")]
fn test_parse_accepts_relative_paths(#[case] input: &str) {
    let path = SerializablePath::parse(input).unwrap();
    assert_eq!(path.as_str(), input);
}

#[test]
fn test_display_matches_as_str() {
    let path = SerializablePath::parse("a/b").unwrap();
    assert_eq!(format!("{path}"), "a/b");
}

#[test]
fn test_ordering_is_lexicographic() {
    let mut paths = vec![
        SerializablePath::parse("b.txt").unwrap(),
        SerializablePath::parse("a/z.txt").unwrap(),
        SerializablePath::parse("a.txt").unwrap(),
    ];
    paths.sort();
    let as_str: Vec<_> = paths.iter().map(|p| p.as_str()).collect();
    assert_eq!(as_str, vec!["a.txt", "a/z.txt", "b.txt"]);
}
