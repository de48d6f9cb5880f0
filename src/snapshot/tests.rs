use super::*;
use tempfile::TempDir;

fn strings(vals: &[&str]) -> Vec<String> {
    vals.iter().map(|v| v.to_string()).collect()
}

fn sample_store() -> TableStore {
    let store = TableStore::new();
    let users = store
        .create_table("users", strings(&["id", "name"]), Some("id".to_string()))
        .unwrap();
    {
        let mut t = users.write();
        t.insert(strings(&["1", "ann"])).unwrap();
        t.insert(strings(&["2", "bob"])).unwrap();
        t.insert(strings(&["3"])).unwrap();
    }
    store
        .create_table("empty", strings(&["x"]), None)
        .unwrap();
    store
}

#[test]
fn test_export_captures_schema_and_order() {
    let snapshot = export(&sample_store());
    assert_eq!(snapshot.tables.len(), 2);

    let users = &snapshot.tables[0];
    assert_eq!(users.name, "users");
    assert_eq!(users.columns, strings(&["id", "name"]));
    assert_eq!(users.primary_key.as_deref(), Some("id"));
    assert_eq!(
        users.records,
        vec![strings(&["3"]), strings(&["2", "bob"]), strings(&["1", "ann"])]
    );

    let empty = &snapshot.tables[1];
    assert_eq!(empty.primary_key, None);
    assert!(empty.records.is_empty());
}

#[test]
fn test_import_restores_traversal_order() {
    let snapshot = export(&sample_store());
    let store = import(snapshot.clone()).unwrap();

    assert_eq!(store.list_names(), strings(&["users", "empty"]));
    assert_eq!(export(&store), snapshot);

    // key constraint is live again after import
    let users = store.get_table("users").unwrap();
    assert!(matches!(
        users.write().insert(strings(&["2", "dup"])),
        Err(StoreError::PrimaryKeyViolation(_))
    ));
}

#[test]
fn test_import_rejects_invalid_snapshots() {
    let dup_key = Snapshot {
        tables: vec![TableSnapshot {
            name: "t".to_string(),
            columns: strings(&["k"]),
            primary_key: Some("k".to_string()),
            records: vec![strings(&["1"]), strings(&["1"])],
        }],
    };
    assert!(matches!(
        import(dup_key),
        Err(StoreError::PrimaryKeyViolation(_))
    ));

    let too_wide = Snapshot {
        tables: vec![TableSnapshot {
            name: "t".to_string(),
            columns: strings(&["k"]),
            primary_key: None,
            records: vec![strings(&["1", "2"])],
        }],
    };
    assert!(matches!(
        import(too_wide),
        Err(StoreError::TooManyValues { .. })
    ));

    let bad_key = Snapshot {
        tables: vec![TableSnapshot {
            name: "t".to_string(),
            columns: strings(&["k"]),
            primary_key: Some("nope".to_string()),
            records: vec![],
        }],
    };
    assert!(matches!(
        import(bad_key),
        Err(StoreError::PrimaryKeyNotInColumns(_))
    ));

    let twice = TableSnapshot {
        name: "t".to_string(),
        columns: strings(&["k"]),
        primary_key: None,
        records: vec![],
    };
    assert!(matches!(
        import(Snapshot {
            tables: vec![twice.clone(), twice]
        }),
        Err(StoreError::TableAlreadyExists(_))
    ));
}

#[test]
fn test_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("db.json");

    let store = sample_store();
    save(&store, &path).unwrap();
    assert!(path.exists());

    let loaded = load(&path).unwrap();
    assert_eq!(export(&loaded), export(&store));
}

#[test]
fn test_values_are_plain_text() {
    let store = TableStore::new();
    let t = store.create_table("t", strings(&["v"]), None).unwrap();
    t.write()
        .insert(strings(&["__import__('os').system('echo hi')"]))
        .unwrap();
    t.write().insert(strings(&["quote\"and\\slash"])).unwrap();

    let bytes = encode(&export(&store)).unwrap();
    let snapshot = decode(&bytes).unwrap();
    assert_eq!(
        snapshot.tables[0].records,
        vec![
            strings(&["quote\"and\\slash"]),
            strings(&["__import__('os').system('echo hi')"]),
        ]
    );
}

#[test]
fn test_decode_detects_tampering() {
    let bytes = encode(&export(&sample_store())).unwrap();
    let text = String::from_utf8(bytes).unwrap().replace("bob", "eve");
    assert!(matches!(
        decode(text.as_bytes()),
        Err(StoreError::SnapshotCorrupted(_))
    ));
}

#[test]
fn test_decode_rejects_other_versions_and_garbage() {
    let snapshot = Snapshot::default();
    let file = SnapshotFile {
        version: SNAPSHOT_FORMAT_VERSION + 1,
        checksum: checksum(&snapshot).unwrap(),
        snapshot,
    };
    let bytes = serde_json::to_vec(&file).unwrap();
    assert!(matches!(
        decode(&bytes),
        Err(StoreError::SnapshotCorrupted(_))
    ));

    assert!(matches!(decode(b"not json"), Err(StoreError::Snapshot(_))));
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(matches!(
        load(temp_dir.path().join("missing.json")),
        Err(StoreError::Io(_))
    ));
}
