use std::fs;
use std::path::{Path, PathBuf};

use gp_results::ExtractionError;
use gp_results::discovery::find_json_files;
use pretty_assertions::assert_eq;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "{}").unwrap();
}

fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<String> {
    let mut out: Vec<String> = files
        .into_iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    out.sort();
    out
}

#[test]
fn finds_json_files_at_any_depth() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "top.json");
    touch(tmp.path(), "expA/seed-1/gen0/a.json");
    touch(tmp.path(), "expA/seed-1/gen1/deeper/still/b.json");
    touch(tmp.path(), "expA/seed-1/gen1/notes.txt");
    touch(tmp.path(), "expB/seed-2/gen0/results.csv");

    let files = find_json_files(tmp.path()).unwrap();
    assert_eq!(
        relative(tmp.path(), files),
        vec![
            "expA/seed-1/gen0/a.json",
            "expA/seed-1/gen1/deeper/still/b.json",
            "top.json",
        ]
    );
}

#[test]
fn name_match_is_a_substring_not_an_extension() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "exp/seed-1/gen0/not.json.txt");
    touch(tmp.path(), "exp/seed-1/gen0/upper.JSON");
    touch(tmp.path(), "exp/seed-1/gen0/lines.jsonl");

    let files = find_json_files(tmp.path()).unwrap();
    assert_eq!(
        relative(tmp.path(), files),
        vec!["exp/seed-1/gen0/lines.jsonl", "exp/seed-1/gen0/not.json.txt"]
    );
}

#[test]
fn directories_named_like_json_are_not_files() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("archive.json")).unwrap();
    touch(tmp.path(), "archive.json/inner.json");

    let files = find_json_files(tmp.path()).unwrap();
    assert_eq!(relative(tmp.path(), files), vec!["archive.json/inner.json"]);
}

#[test]
fn traversal_order_is_stable() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "b/seed-1/gen0/x.json");
    touch(tmp.path(), "a/seed-1/gen0/x.json");
    touch(tmp.path(), "a/seed-1/gen1/x.json");

    let first = find_json_files(tmp.path()).unwrap();
    let second = find_json_files(tmp.path()).unwrap();
    assert_eq!(first, second);
    assert!(first[0].ends_with("a/seed-1/gen0/x.json"));
    assert!(first[2].ends_with("b/seed-1/gen0/x.json"));
}

#[test]
fn empty_tree_yields_no_files() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("expA/seed-1/gen0")).unwrap();

    assert!(find_json_files(tmp.path()).unwrap().is_empty());
}

#[test]
fn missing_root_is_a_walk_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = find_json_files(tmp.path().join("does_not_exist")).unwrap_err();
    assert!(matches!(err, ExtractionError::Walk(_)));
}
