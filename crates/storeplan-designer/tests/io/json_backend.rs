use std::fs;

use storeplan_core::PersistenceError;
use storeplan_designer::persistence::{JsonDirectoryBackend, LayoutBackend};
use storeplan_designer::{EditMode, LayoutFile, LayoutSession, SessionOptions};
use tempfile::TempDir;

fn session(store: &str) -> LayoutSession {
    LayoutSession::new(SessionOptions {
        store_name: store.to_string(),
        ..SessionOptions::default()
    })
}

#[test]
fn test_save_writes_one_file_per_store() {
    let dir = TempDir::new().unwrap();
    let backend = JsonDirectoryBackend::new(dir.path().join("layouts")).unwrap();

    let mut session = session("downtown");
    session.add_fixture();
    session.save(&backend).unwrap();

    let path = dir.path().join("layouts").join("downtown.json");
    assert!(path.exists());
    let text = fs::read_to_string(&path).unwrap();
    let file = LayoutFile::from_json(&text).unwrap();
    assert_eq!(file.store_name(), "downtown");
    assert_eq!(file.fixtures.len(), 1);
    assert!(!dir.path().join("layouts").join("downtown.json.tmp").exists());
}

#[test]
fn test_load_restores_edited_outline() {
    let dir = TempDir::new().unwrap();
    let backend = JsonDirectoryBackend::new(dir.path()).unwrap();

    let mut session = session("north");
    let id = session.add_fixture();
    session.select_fixture(&id).unwrap();
    session.set_mode(EditMode::Edit);
    session.select_edge(0).unwrap();
    session.add_node_to_selected_edge().unwrap();
    session.set_rotation(&id, 45.0).unwrap();
    session.save(&backend).unwrap();

    let mut reloaded = LayoutSession::default();
    reloaded.load(&backend, "north").unwrap();
    assert_eq!(reloaded.store_name(), "north");
    assert_eq!(reloaded.fixture(&id), session.fixture(&id));
    assert!(reloaded.selection().selected_fixture().is_none());
}

#[test]
fn test_load_missing_store() {
    let dir = TempDir::new().unwrap();
    let backend = JsonDirectoryBackend::new(dir.path()).unwrap();
    let mut session = session("north");
    session.add_fixture();

    let err = session.load(&backend, "south").unwrap_err();
    assert!(matches!(err, PersistenceError::LayoutNotFound { ref store } if store == "south"));
    assert_eq!(session.fixture_count(), 1);
}

#[test]
fn test_corrupt_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let backend = JsonDirectoryBackend::new(dir.path()).unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    let mut session = session("north");
    let id = session.add_fixture();
    assert!(matches!(
        session.load(&backend, "broken"),
        Err(PersistenceError::Json(_))
    ));
    assert!(session.fixture(&id).is_some());
}

#[test]
fn test_invalid_store_name_never_touches_disk() {
    let dir = TempDir::new().unwrap();
    let backend = JsonDirectoryBackend::new(dir.path()).unwrap();
    let mut session = session("../escape");
    session.add_fixture();

    assert!(matches!(
        session.save(&backend),
        Err(PersistenceError::InvalidStoreName { .. })
    ));
    assert!(session.is_modified());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_clear_removes_saved_layout_only() {
    let dir = TempDir::new().unwrap();
    let backend = JsonDirectoryBackend::new(dir.path()).unwrap();
    let mut session = session("east");
    session.add_fixture();
    session.save(&backend).unwrap();

    session.clear(&backend).unwrap();
    assert!(matches!(
        backend.load_layout("east"),
        Err(PersistenceError::LayoutNotFound { .. })
    ));
    assert_eq!(session.fixture_count(), 1);
    // Clearing twice is fine.
    session.clear(&backend).unwrap();
}
