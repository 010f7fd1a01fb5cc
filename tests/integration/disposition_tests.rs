use namedupe::actions::{Disposer, DispositionError, DispositionState, PermanentRemover};
use namedupe::duplicates::{Comparator, ComparatorConfig};
use namedupe::scanner::{OsFilesystem, Walker, WalkerConfig};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::tempdir;

fn setup_copies(root: &Path, copies: usize) {
    for i in 0..copies {
        let sub = root.join(format!("dir{}", i));
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("track.flac"), format!("copy {}", i)).unwrap();
    }
}

fn flagged(root: &Path) -> namedupe::duplicates::DuplicateSet {
    let mut index = Walker::new(OsFilesystem, WalkerConfig::default())
        .walk(root)
        .unwrap();
    let mut set = Comparator::new(ComparatorConfig::default().with_workers(4))
        .find_duplicates(&mut index)
        .unwrap();
    set.sort_by_position();
    set
}

#[test]
fn test_silent_deletes_every_later_copy() {
    let dir = tempdir().unwrap();
    setup_copies(dir.path(), 3);
    let duplicates = flagged(dir.path());

    let mut output = Vec::new();
    let mut disposer = Disposer::new(Cursor::new(Vec::new()), &mut output, PermanentRemover);
    let mut state = DispositionState::silent();
    let report = disposer.run(&mut state, &duplicates).unwrap();

    assert_eq!(report.deleted, 2);
    assert_eq!(report.prompts, 0);
    assert!(output.is_empty());
    assert!(dir.path().join("dir0/track.flac").exists());
    assert!(!dir.path().join("dir1/track.flac").exists());
    assert!(!dir.path().join("dir2/track.flac").exists());
}

#[test]
fn test_interactive_answers_apply_per_file() {
    let dir = tempdir().unwrap();
    setup_copies(dir.path(), 3);
    let duplicates = flagged(dir.path());

    let mut output = Vec::new();
    let mut disposer = Disposer::new(
        Cursor::new(b"n\ny\n".to_vec()),
        &mut output,
        PermanentRemover,
    );
    let mut state = DispositionState::default();
    let report = disposer.run(&mut state, &duplicates).unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.deleted, 1);
    assert!(dir.path().join("dir1/track.flac").exists());
    assert!(!dir.path().join("dir2/track.flac").exists());

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.matches("Do you want to delete file").count(), 2);
}

#[test]
fn test_list_only_keeps_everything() {
    let dir = tempdir().unwrap();
    setup_copies(dir.path(), 4);
    let duplicates = flagged(dir.path());

    let mut output = Vec::new();
    let mut disposer = Disposer::new(Cursor::new(b"l\n".to_vec()), &mut output, PermanentRemover);
    let mut state = DispositionState::default();
    let report = disposer.run(&mut state, &duplicates).unwrap();

    assert!(state.list_only);
    assert_eq!(report.listed, 3);
    assert_eq!(report.deleted, 0);
    for i in 0..4 {
        assert!(dir.path().join(format!("dir{}/track.flac", i)).exists());
    }

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.matches("Duplicate: ").count(), 3);
}

#[test]
fn test_vanished_file_aborts_run() {
    let dir = tempdir().unwrap();
    setup_copies(dir.path(), 3);
    let duplicates = flagged(dir.path());
    fs::remove_file(dir.path().join("dir1/track.flac")).unwrap();

    let mut disposer = Disposer::new(Cursor::new(Vec::new()), Vec::new(), PermanentRemover);
    let mut state = DispositionState::silent();
    let result = disposer.run(&mut state, &duplicates);

    assert!(matches!(result, Err(DispositionError::Delete(_))));
    // The run stops at the failure, so the later copy survives.
    assert!(dir.path().join("dir2/track.flac").exists());
}
