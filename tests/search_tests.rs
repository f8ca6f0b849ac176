//! End-to-end tests for word search over directories on disk.
//!
//! Library tests build trees with `tempfile`; CLI tests run the compiled
//! `wordsearch` binary against the same kind of fixture.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use wordsearch::index::{list_files, Hasher, HasherConfig};
use wordsearch::tree::{DirTree, FileTree};
use wordsearch::{BuildError, SearchError, Searcher};

/// Write files (relative path, contents) under a fresh temp directory
fn fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (path, contents) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, contents).unwrap();
    }
    dir
}

fn searcher(dir: &Path) -> Searcher<DirTree> {
    Searcher::new(DirTree::new(dir).unwrap())
}

fn as_set(files: Vec<String>) -> HashSet<String> {
    files.into_iter().collect()
}

fn set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_hello_world_scenario() {
    let dir = fixture(&[("a.txt", "hello world"), ("b.txt", "hello there")]);
    let searcher = searcher(dir.path());

    assert_eq!(as_set(searcher.search("hello").unwrap()), set(&["a.txt", "b.txt"]));
    assert_eq!(searcher.search("world").unwrap(), vec!["a.txt"]);
    assert!(searcher.search("xyz").unwrap().is_empty());
}

#[test]
fn test_nested_directories_use_relative_slash_paths() {
    let dir = fixture(&[
        ("top.txt", "alpha"),
        ("docs/guide.md", "alpha beta"),
        ("docs/api/ref.md", "beta gamma"),
    ]);
    let searcher = searcher(dir.path());

    assert_eq!(
        as_set(searcher.search("alpha").unwrap()),
        set(&["top.txt", "docs/guide.md"])
    );
    assert_eq!(
        as_set(searcher.search("beta").unwrap()),
        set(&["docs/guide.md", "docs/api/ref.md"])
    );
    assert_eq!(searcher.search("gamma").unwrap(), vec!["docs/api/ref.md"]);
}

#[test]
fn test_enumeration_excludes_directories() {
    let dir = fixture(&[("a.txt", "x"), ("sub/b.txt", "y")]);
    fs::create_dir(dir.path().join("empty")).unwrap();

    let files = list_files(&DirTree::new(dir.path()).unwrap()).unwrap();
    assert_eq!(files, vec!["a.txt", "sub/b.txt"]);
}

#[test]
fn test_many_files_small_limit() {
    let dir = TempDir::new().unwrap();
    for i in 0..120 {
        fs::write(dir.path().join(format!("file{i}.txt")), format!("needle n{i}")).unwrap();
    }

    let index = Hasher::new(HasherConfig::with_concurrency_limit(3))
        .build(&DirTree::new(dir.path()).unwrap())
        .unwrap();
    assert_eq!(index.files_containing("needle").len(), 120);
    assert_eq!(index.files_containing("n7"), vec!["file7.txt"]);
    assert_eq!(index.stats().files, 120);
}

#[test]
fn test_invalid_utf8_is_decoded_lossily() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("blob.bin"), b"head\xff\xfetail").unwrap();

    let searcher = searcher(dir.path());
    assert_eq!(searcher.search("head").unwrap(), vec!["blob.bin"]);
    assert_eq!(searcher.search("tail").unwrap(), vec!["blob.bin"]);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_file_name_does_not_fail_search() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = fixture(&[("a.txt", "hello")]);
    let odd = dir.path().join(OsStr::from_bytes(b"bad\xff.txt"));
    // Some filesystems refuse names that are not UTF-8
    if fs::write(&odd, "hello").is_err() {
        return;
    }

    assert_eq!(searcher(dir.path()).search("hello").unwrap(), vec!["a.txt"]);
}

#[test]
fn test_parent_paths_cannot_leave_root() {
    let dir = fixture(&[("secret.txt", "hidden"), ("inner/a.txt", "visible")]);
    let tree = DirTree::new(dir.path().join("inner")).unwrap();

    let err = tree.open("../secret.txt").err().unwrap();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_fails_search() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    for i in 0..99 {
        fs::write(dir.path().join(format!("ok{i}.txt")), "common").unwrap();
    }
    let locked = dir.path().join("locked.txt");
    fs::write(&locked, "common").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not stop root
    if fs::read(&locked).is_ok() {
        return;
    }

    let err = searcher(dir.path()).search("common").unwrap_err();
    assert!(err.is_build_failure());
    assert!(
        matches!(err, SearchError::Build(BuildError::FileRead(ref e)) if e.path() == "locked.txt")
    );
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_fails_search() {
    use std::os::unix::fs::PermissionsExt;

    let dir = fixture(&[("a.txt", "common"), ("private/b.txt", "common")]);
    let private = dir.path().join("private");
    fs::set_permissions(&private, fs::Permissions::from_mode(0o000)).unwrap();

    let readable = fs::read_dir(&private).is_ok();
    let result = searcher(dir.path()).search("common");

    // Let TempDir clean up
    fs::set_permissions(&private, fs::Permissions::from_mode(0o755)).unwrap();

    if readable {
        return;
    }
    let err = result.unwrap_err();
    assert!(
        matches!(err, SearchError::Build(BuildError::Enumeration(ref e)) if e.dir == "private")
    );
}

fn wordsearch() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wordsearch"))
}

#[test]
fn test_cli_search_lines() {
    let dir = fixture(&[("b.txt", "hello there"), ("a.txt", "hello world")]);

    let output = wordsearch()
        .args(["search", "hello", "--no-color", "-p"])
        .arg(dir.path())
        .output()
        .expect("Failed to run wordsearch");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "a.txt\nb.txt\n");
}

#[test]
fn test_cli_search_json() {
    let dir = fixture(&[("a.txt", "hello world"), ("b.txt", "hello there")]);

    let output = wordsearch()
        .args(["search", "  world ", "--json", "-j", "2", "-p"])
        .arg(dir.path())
        .output()
        .expect("Failed to run wordsearch");

    assert!(output.status.success());
    let files: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(files, vec!["a.txt"]);
}

#[test]
fn test_cli_no_match_prints_empty_json_array() {
    let dir = fixture(&[("a.txt", "hello world")]);

    let output = wordsearch()
        .args(["search", "xyz", "--json", "-p"])
        .arg(dir.path())
        .output()
        .expect("Failed to run wordsearch");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
}

#[test]
fn test_cli_rejects_empty_query() {
    let dir = fixture(&[("a.txt", "hello")]);

    let output = wordsearch()
        .args(["search", "   ", "-p"])
        .arg(dir.path())
        .output()
        .expect("Failed to run wordsearch");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("empty"));
}

#[test]
fn test_cli_rejects_zero_concurrency() {
    let dir = fixture(&[("a.txt", "hello")]);

    let output = wordsearch()
        .args(["search", "hello", "-j", "0", "-p"])
        .arg(dir.path())
        .output()
        .expect("Failed to run wordsearch");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_tokens() {
    let dir = fixture(&[("code.txt", "foo-bar_baz 123")]);

    let output = wordsearch()
        .arg("tokens")
        .arg(dir.path().join("code.txt"))
        .output()
        .expect("Failed to run wordsearch");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "foo\nbar\nbaz\n123\n");
}
