use duenotes_core::session::from_fields;
use duenotes_core::{remaining_for, EditSession, NoteStore};
use chrono::NaiveDateTime;
use std::fs;
use tempfile::tempdir;

fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2098-12-31 22:58:59", "%Y-%m-%d %H:%M:%S").unwrap()
}

#[test]
fn fresh_start_add_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");

    let mut store = NoteStore::open(&path).unwrap();
    assert!(store.list().is_empty());

    let note = from_fields("A".to_string(), "B".to_string(), "2099-01-01 00:00:00").unwrap();
    store.add(note.clone()).unwrap();

    let reloaded = NoteStore::open(&path).unwrap();
    assert_eq!(reloaded.list(), &[note]);
}

#[test]
fn delete_first_of_two_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");

    let mut store = NoteStore::open(&path).unwrap();
    store.add(from_fields("first".to_string(), String::new(), "2099-01-01 00:00:00").unwrap()).unwrap();
    store.add(from_fields("second".to_string(), String::new(), "2099-06-01 00:00:00").unwrap()).unwrap();

    store.delete_at(0).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].title, "second");

    let reloaded = NoteStore::open(&path).unwrap();
    assert_eq!(reloaded.list(), store.list());
}

#[test]
fn empty_collection_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");

    let store = NoteStore::new(&path);
    store.save().unwrap();
    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, serde_json::json!([]));

    let reloaded = NoteStore::open(&path).unwrap();
    assert!(reloaded.is_empty());
}

#[test]
fn delete_everything_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");

    let mut store = NoteStore::open(&path).unwrap();
    store.add(from_fields("only".to_string(), String::new(), "2099-01-01 00:00:00").unwrap()).unwrap();
    store.delete_at(0).unwrap();

    let mut reloaded = NoteStore::open(&path).unwrap();
    assert!(reloaded.list().is_empty());
    reloaded.load().unwrap();
    assert_eq!(reloaded.len(), 0);
}

#[test]
fn reads_files_without_ids() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");
    fs::write(
        &path,
        r#"[{"title": "A", "content": "B", "deadline": "2099-01-01 00:00:00"},
            {"title": "C", "content": "", "deadline": "broken"}]"#,
    )
    .unwrap();

    let store = NoteStore::open(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert_ne!(store.list()[0].id, store.list()[1].id);

    // One bad deadline only affects its own note
    assert_eq!(remaining_for(&store.list()[0], now()).unwrap().to_string(), "1:01:01");
    assert!(remaining_for(&store.list()[1], now()).is_err());
}

#[test]
fn written_file_is_a_plain_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");

    let mut store = NoteStore::open(&path).unwrap();
    store.add(from_fields("A".to_string(), "B".to_string(), "2099-01-01 00:00:00").unwrap()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "A");
    assert_eq!(items[0]["content"], "B");
    assert_eq!(items[0]["deadline"], "2099-01-01 00:00:00");
}

#[test]
fn edit_flow_resolves_by_id() {
    let dir = tempdir().unwrap();
    let mut store = NoteStore::open(dir.path().join("notes.json")).unwrap();
    store.add(from_fields("A".to_string(), String::new(), "2099-01-01 00:00:00").unwrap()).unwrap();
    store.add(from_fields("B".to_string(), String::new(), "2099-01-01 00:00:00").unwrap()).unwrap();

    let mut session = EditSession::edit(&store.list()[1]);
    session.fields.title = "B (edited)".to_string();

    // The list changes while the editor is open
    store.delete_at(0).unwrap();

    let edited = session.resolve(session.accept()).unwrap().unwrap();
    let index = store.position_of(session.target_id().unwrap()).unwrap();
    store.update_at(index, edited).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].title, "B (edited)");
}
