#![allow(clippy::unwrap_used)]

use super::*;

fn store() -> (tempfile::TempDir, SessionStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::in_dir(dir.path());
    (dir, store)
}

#[test]
fn test_load_without_file_is_logged_out() {
    let (_dir, store) = store();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_save_then_load() {
    let (_dir, store) = store();
    store.save(&Session::new("tok-123")).unwrap();
    assert_eq!(store.load().unwrap(), Some(Session::new("tok-123")));
}

#[test]
fn test_save_overwrites_previous_token() {
    let (_dir, store) = store();
    store.save(&Session::new("first")).unwrap();
    store.save(&Session::new("second")).unwrap();
    assert_eq!(store.load().unwrap().unwrap().token, "second");
}

#[test]
fn test_blank_file_is_logged_out() {
    let (_dir, store) = store();
    std::fs::write(store.path(), "  \n").unwrap();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_token_whitespace_trimmed() {
    let (_dir, store) = store();
    std::fs::write(store.path(), "abc\n").unwrap();
    assert_eq!(store.load().unwrap().unwrap().token, "abc");
}

#[test]
fn test_clear_removes_session() {
    let (_dir, store) = store();
    store.save(&Session::new("tok")).unwrap();
    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
    assert!(!store.path().exists());
}

#[test]
fn test_clear_when_logged_out_is_ok() {
    let (_dir, store) = store();
    assert!(store.clear().is_ok());
}

#[test]
fn test_save_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::in_dir(&dir.path().join("nested").join("data"));
    store.save(&Session::new("tok")).unwrap();
    assert!(store.load().unwrap().is_some());
}

#[cfg(unix)]
#[test]
fn test_session_file_is_private() {
    use std::os::unix::fs::PermissionsExt;
    let (_dir, store) = store();
    store.save(&Session::new("tok")).unwrap();
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_debug_redacts_token() {
    let rendered = format!("{:?}", Session::new("super-secret"));
    assert!(!rendered.contains("super-secret"));
}
