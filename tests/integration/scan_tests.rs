use namedupe::duplicates::{Comparator, ComparatorConfig};
use namedupe::scanner::{OsFilesystem, ScanError, Walker, WalkerConfig};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().write_all(content).unwrap();
}

fn scan(root: &Path, include_hidden: bool) -> (Vec<String>, Vec<String>) {
    let mut index = Walker::new(OsFilesystem, WalkerConfig::new(include_hidden))
        .walk(root)
        .unwrap();
    let mut duplicates = Comparator::new(ComparatorConfig::default())
        .find_duplicates(&mut index)
        .unwrap();
    duplicates.sort_by_position();

    let relative = |p: &Path| {
        p.strip_prefix(root)
            .unwrap()
            .to_string_lossy()
            .replace('\\', "/")
    };
    (
        index.iter().map(|e| relative(&e.full_path)).collect(),
        duplicates.iter().map(|e| relative(&e.full_path)).collect(),
    )
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let (indexed, flagged) = scan(dir.path(), false);

    assert!(indexed.is_empty());
    assert!(flagged.is_empty());
}

#[test]
fn test_scan_unique_names() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.txt"), b"same");
    write_file(&dir.path().join("b.txt"), b"same");
    write_file(&dir.path().join("c.txt"), b"same");

    let (indexed, flagged) = scan(dir.path(), false);

    // Identical content under different names is not a collision.
    assert_eq!(indexed.len(), 3);
    assert!(flagged.is_empty());
}

#[test]
fn test_scan_same_name_in_sibling_directories() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a/x.txt"), b"one");
    write_file(&dir.path().join("b/x.txt"), b"two");
    write_file(&dir.path().join("c/y.txt"), b"three");

    let (indexed, flagged) = scan(dir.path(), false);

    assert_eq!(indexed, vec!["a/x.txt", "b/x.txt", "c/y.txt"]);
    assert_eq!(flagged, vec!["b/x.txt"]);
}

#[test]
fn test_scan_depth_first_order_decides_survivor() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a/deep/nested/song.mp3"), b"1");
    write_file(&dir.path().join("b/song.mp3"), b"2");
    write_file(&dir.path().join("song.mp3"), b"3");

    let (indexed, flagged) = scan(dir.path(), false);

    assert_eq!(
        indexed,
        vec!["a/deep/nested/song.mp3", "b/song.mp3", "song.mp3"]
    );
    assert_eq!(flagged, vec!["b/song.mp3", "song.mp3"]);
}

#[test]
fn test_scan_many_copies_flags_all_but_first() {
    let dir = tempdir().unwrap();
    for i in 0..20 {
        write_file(&dir.path().join(format!("d{:02}/dup.txt", i)), b"x");
    }
    write_file(&dir.path().join("d00/other.txt"), b"x");

    let (indexed, flagged) = scan(dir.path(), false);

    assert_eq!(indexed.len(), 21);
    assert_eq!(flagged.len(), 19);
    assert!(!flagged.contains(&"d00/dup.txt".to_string()));
}

#[test]
fn test_scan_names_are_case_sensitive() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a/Readme"), b"1");
    write_file(&dir.path().join("b/README"), b"2");

    let (_, flagged) = scan(dir.path(), false);
    assert!(flagged.is_empty());
}

#[test]
fn test_scan_hidden_entries_skipped_by_default() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a/.hidden"), b"1");
    write_file(&dir.path().join("b/.hidden"), b"2");
    write_file(&dir.path().join(".cache/x.txt"), b"3");
    write_file(&dir.path().join("c/x.txt"), b"4");

    let (indexed, flagged) = scan(dir.path(), false);

    assert_eq!(indexed, vec!["c/x.txt"]);
    assert!(flagged.is_empty());
}

#[test]
fn test_scan_hidden_entries_included() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a/.hidden"), b"1");
    write_file(&dir.path().join("b/.hidden"), b"2");
    write_file(&dir.path().join(".cache/x.txt"), b"3");
    write_file(&dir.path().join("c/x.txt"), b"4");

    let (indexed, flagged) = scan(dir.path(), true);

    assert_eq!(indexed.len(), 4);
    assert_eq!(flagged, vec!["b/.hidden", "c/x.txt"]);
}

#[test]
fn test_scan_missing_root_fails() {
    let dir = tempdir().unwrap();
    let result = Walker::new(OsFilesystem, WalkerConfig::default()).walk(dir.path().join("gone"));

    assert!(matches!(result, Err(ScanError::NotFound(_))));
}

#[cfg(target_os = "linux")]
#[test]
fn test_scan_compares_raw_name_bytes() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempdir().unwrap();
    let ff = OsStr::from_bytes(b"\xff.txt");
    let fe = OsStr::from_bytes(b"\xfe.txt");
    write_file(&dir.path().join("a").join(ff), b"1");
    write_file(&dir.path().join("b").join(fe), b"2");
    write_file(&dir.path().join("c").join(ff), b"3");

    let mut index = Walker::new(OsFilesystem, WalkerConfig::default())
        .walk(dir.path())
        .unwrap();
    let duplicates = Comparator::new(ComparatorConfig::default())
        .find_duplicates(&mut index)
        .unwrap();

    // Both invalid names render as "\u{FFFD}.txt" but are different files.
    assert_eq!(index.len(), 3);
    let flagged: Vec<_> = duplicates.iter().map(|e| e.full_path.clone()).collect();
    assert_eq!(flagged, vec![dir.path().join("c").join(ff)]);
}
