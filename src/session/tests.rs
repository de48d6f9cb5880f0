use super::*;
use crate::error::StoreError;
use crate::types::InsertMode;
use tempfile::TempDir;

fn session(dir: &TempDir) -> Session {
    Session::new(StoreConfig::new(dir.path()))
}

fn select(session: &mut Session, sql: &str) -> Vec<Vec<String>> {
    match session.execute(sql).unwrap() {
        Output::Rows(rs) => rs.rows,
        other => panic!("expected rows, got {:?}", other),
    }
}

#[test]
fn test_feed_line_multi_line_command() {
    let dir = TempDir::new().unwrap();
    let mut s = session(&dir);

    assert!(s.feed_line("create users").is_none());
    assert!(s.is_pending());
    assert!(s.feed_line("(id, name)").is_none());
    let out = s.feed_line("primarykey=id;").unwrap().unwrap();
    assert_eq!(out, Output::Created("users".to_string()));
    assert!(!s.is_pending());

    assert!(s.feed_line("   ").is_none());
    assert!(s.feed_line(";").is_none());
    assert!(!s.is_pending());
}

#[test]
fn test_feed_line_error_does_not_stick() {
    let dir = TempDir::new().unwrap();
    let mut s = session(&dir);

    let result = s.feed_line("select nope *;").unwrap();
    assert!(matches!(result, Err(StoreError::TableNotFound(_))));
    assert!(!s.is_pending());

    let out = s.feed_line("show;").unwrap().unwrap();
    assert_eq!(out, Output::Tables(vec![]));
}

#[test]
fn test_save_new_load_cycle() {
    let dir = TempDir::new().unwrap();
    let mut s = session(&dir);

    s.execute("create t (id,name) primarykey=id;").unwrap();
    s.execute("insert t (1,a) (2,b) (3,c);").unwrap();
    s.execute("create u (x) primarykey=none;").unwrap();

    let out = s.execute("save snap;").unwrap();
    let path = dir.path().join("snap.json");
    assert_eq!(out, Output::Saved(path.clone()));
    assert!(path.exists());

    assert_eq!(s.execute("new database;").unwrap(), Output::NewDatabase);
    assert!(s.executor().list_tables().is_empty());

    let out = s.execute("load snap;").unwrap();
    assert_eq!(out, Output::Loaded { path, tables: 2 });
    assert_eq!(s.executor().list_tables(), vec!["t".to_string(), "u".to_string()]);

    let ids: Vec<String> = select(&mut s, "select t id;").into_iter().flatten().collect();
    assert_eq!(ids, vec!["3", "2", "1"]);
}

#[test]
fn test_load_replaces_store_and_invalidates_handles() {
    let dir = TempDir::new().unwrap();
    let mut s = session(&dir);
    s.execute("create t (id) primarykey=none;").unwrap();
    s.execute("save empty;").unwrap();

    s.execute("insert t (1) (2);").unwrap();
    let handle = s.executor().store().get_table("t").unwrap();
    assert_eq!(handle.read().len(), 2);

    s.execute("load empty;").unwrap();
    assert!(handle.read().is_empty());
    assert!(select(&mut s, "select t *;").is_empty());
}

#[test]
fn test_load_failure_keeps_current_store() {
    let dir = TempDir::new().unwrap();
    let mut s = session(&dir);
    s.execute("create t (id) primarykey=none;").unwrap();

    assert!(matches!(s.execute("load missing;"), Err(StoreError::Io(_))));
    std::fs::write(dir.path().join("broken.json"), b"{}").unwrap();
    assert!(matches!(s.execute("load broken;"), Err(StoreError::Snapshot(_))));

    assert_eq!(s.executor().list_tables(), vec!["t".to_string()]);
}

#[test]
fn test_invalid_snapshot_name() {
    let dir = TempDir::new().unwrap();
    let mut s = session(&dir);
    assert!(matches!(
        s.execute("save ../outside;"),
        Err(StoreError::InvalidCommand(_))
    ));
}

#[test]
fn test_exit() {
    let dir = TempDir::new().unwrap();
    let mut s = session(&dir);
    assert_eq!(s.execute("exit;").unwrap(), Output::Exit);
}

#[test]
fn test_session_uses_configured_insert_mode() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new(dir.path()).with_insert_mode(InsertMode::Atomic);
    let mut s = Session::new(config);
    assert_eq!(s.executor().insert_mode(), InsertMode::Atomic);

    s.execute("create t (k) primarykey=k;").unwrap();
    assert!(s.execute("insert t (1) (1);").is_err());
    assert!(select(&mut s, "select t *;").is_empty());
}
