use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use upload_release_asset::error::UploaderError;
use upload_release_asset::services::resolver::resolve_asset_paths;

fn setup_tree() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let dirs = [
        "single_file_folder_asset_path",
        "double_file_folder_asset_path",
        "path/to",
        "some_build/nested",
        "some/other/path",
    ];
    for dir in dirs {
        fs::create_dir_all(root.path().join(dir)).unwrap();
    }

    let files: &[(&str, &[u8])] = &[
        ("single_file_folder_asset_path/singlefile.js", &b"file content here"[..]),
        ("double_file_folder_asset_path/secondFile.js", &b"file content here"[..]),
        ("double_file_folder_asset_path/firstFile.js", &b"file content here"[..]),
        ("path/to/some.png", &[8u8, 6, 7, 5, 3, 0, 9][..]),
        ("some_build/test.exe", &[8u8, 1, 7, 5, 3, 0, 9][..]),
        ("some_build/test2.exe", &[8u8, 6, 7, 5, 3, 0, 9][..]),
        ("some_build/test.dmg", &[8u8, 6, 7, 1, 3, 4, 9][..]),
        ("some_build/test.AppImage", &[8u8, 2, 7, 5, 3, 0, 9][..]),
        ("some_build/nested/deep.exe", &[1u8, 2, 3][..]),
    ];
    for (path, contents) in files {
        fs::write(root.path().join(path), contents).unwrap();
    }

    root
}

fn pattern(root: &Path, rest: &str) -> String {
    format!("{}/{}", root.display(), rest)
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_single_file() {
    let root = setup_tree();
    let file = root.path().join("single_file_folder_asset_path/singlefile.js");

    let paths = resolve_asset_paths(file.to_str().unwrap()).unwrap();

    assert_eq!(paths, vec![file]);
}

#[test]
fn test_directory_lists_direct_children_only() {
    let root = setup_tree();

    let paths = resolve_asset_paths(&pattern(root.path(), "some_build")).unwrap();

    assert_eq!(
        names(&paths),
        vec!["test.AppImage", "test.dmg", "test.exe", "test2.exe"]
    );
    assert!(paths.iter().all(|p| p.parent() == Some(root.path().join("some_build").as_path())));
}

#[test]
fn test_directory_order_is_by_name() {
    let root = setup_tree();

    let paths = resolve_asset_paths(&pattern(root.path(), "double_file_folder_asset_path")).unwrap();

    assert_eq!(names(&paths), vec!["firstFile.js", "secondFile.js"]);
}

#[test]
fn test_empty_directory_resolves_to_nothing() {
    let root = setup_tree();

    let paths = resolve_asset_paths(&pattern(root.path(), "some/other/path")).unwrap();

    assert!(paths.is_empty());
}

#[test]
fn test_recursive_glob() {
    let root = setup_tree();

    let mut paths = resolve_asset_paths(&pattern(root.path(), "**/*.exe")).unwrap();
    paths.sort();

    assert_eq!(
        paths,
        vec![
            root.path().join("some_build/nested/deep.exe"),
            root.path().join("some_build/test.exe"),
            root.path().join("some_build/test2.exe"),
        ]
    );
}

#[test]
fn test_glob_excludes_non_matching_files() {
    let root = setup_tree();

    let paths = resolve_asset_paths(&pattern(root.path(), "some_build/test*.exe")).unwrap();

    assert_eq!(names(&paths), vec!["test.exe", "test2.exe"]);
}

#[test]
fn test_unmatched_glob_is_not_found() {
    let root = setup_tree();
    let glob = pattern(root.path(), "**/*.msi");

    let err = resolve_asset_paths(&glob).unwrap_err();

    assert!(matches!(err, UploaderError::NotFound(ref p) if *p == glob));
}

#[test]
fn test_glob_skips_hidden_files_unless_named() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("dist/.cache")).unwrap();
    fs::write(root.path().join("dist/.env"), b"SECRET=1").unwrap();
    fs::write(root.path().join("dist/a.zip"), b"a").unwrap();
    fs::write(root.path().join("dist/.cache/b.zip"), b"b").unwrap();

    let paths = resolve_asset_paths(&pattern(root.path(), "dist/*")).unwrap();
    assert_eq!(names(&paths), vec!["a.zip"]);

    let paths = resolve_asset_paths(&pattern(root.path(), "**/*.zip")).unwrap();
    assert_eq!(names(&paths), vec!["a.zip"]);

    let paths = resolve_asset_paths(&pattern(root.path(), "dist/.env")).unwrap();
    assert_eq!(paths, vec![root.path().join("dist/.env")]);
}
