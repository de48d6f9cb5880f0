//! Snapshot module for saving and loading a whole table store
//!
//! A snapshot lists every table with its schema and its records. Records
//! are kept in traversal order (most recent first) and restored in that
//! same order. On disk the snapshot is a JSON document carrying a format
//! version and a CRC32 of the serialized snapshot body.

use crate::catalog::TableStore;
use crate::error::{StoreError, StoreResult};
use crate::types::SNAPSHOT_FORMAT_VERSION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// One table in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub name: String,
    pub columns: Vec<String>,
    pub primary_key: Option<String>,
    /// Record values, most recently inserted first
    pub records: Vec<Vec<String>>,
}

/// Structured image of a table store
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tables in creation order
    pub tables: Vec<TableSnapshot>,
}

/// On-disk envelope
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    checksum: u32,
    snapshot: Snapshot,
}

/// Capture every table of the store
pub fn export(store: &TableStore) -> Snapshot {
    let tables = store
        .list_tables()
        .iter()
        .map(|handle| {
            let table = handle.read();
            TableSnapshot {
                name: table.name().to_string(),
                columns: table.columns().to_vec(),
                primary_key: table.primary_key().map(str::to_string),
                records: table.records().map(|r| r.values().to_vec()).collect(),
            }
        })
        .collect();

    Snapshot { tables }
}

/// Rebuild a store from a snapshot.
///
/// Tables and records go through the regular create and insert checks, so
/// a snapshot breaking any table invariant is rejected.
pub fn import(snapshot: Snapshot) -> StoreResult<TableStore> {
    let store = TableStore::new();

    for ts in snapshot.tables {
        let handle = store.create_table(&ts.name, ts.columns, ts.primary_key)?;
        let mut table = handle.write();
        // oldest first, so the first listed record ends up as the head
        for values in ts.records.into_iter().rev() {
            table.insert(values)?;
        }
    }

    Ok(store)
}

fn checksum(snapshot: &Snapshot) -> StoreResult<u32> {
    Ok(crc32fast::hash(&serde_json::to_vec(snapshot)?))
}

/// Serialize a snapshot into its file form
pub fn encode(snapshot: &Snapshot) -> StoreResult<Vec<u8>> {
    let file = SnapshotFile {
        version: SNAPSHOT_FORMAT_VERSION,
        checksum: checksum(snapshot)?,
        snapshot: snapshot.clone(),
    };
    Ok(serde_json::to_vec_pretty(&file)?)
}

/// Parse and verify a snapshot file body
pub fn decode(bytes: &[u8]) -> StoreResult<Snapshot> {
    let file: SnapshotFile = serde_json::from_slice(bytes)?;

    if file.version != SNAPSHOT_FORMAT_VERSION {
        return Err(StoreError::SnapshotCorrupted(format!(
            "unsupported format version {}",
            file.version
        )));
    }

    let actual = checksum(&file.snapshot)?;
    if actual != file.checksum {
        return Err(StoreError::SnapshotCorrupted(format!(
            "checksum mismatch: stored {:08x}, computed {:08x}",
            file.checksum, actual
        )));
    }

    Ok(file.snapshot)
}

/// Write the store to `path`, creating parent directories
pub fn save(store: &TableStore, path: impl AsRef<Path>) -> StoreResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let snapshot = export(store);
    fs::write(path, encode(&snapshot)?)?;

    info!(path = %path.display(), tables = snapshot.tables.len(), "saved snapshot");
    Ok(())
}

/// Read a store back from `path`
pub fn load(path: impl AsRef<Path>) -> StoreResult<TableStore> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;

    let store = decode(&bytes).and_then(import).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "rejected snapshot");
    })?;

    info!(path = %path.display(), tables = store.len(), "loaded snapshot");
    Ok(store)
}
