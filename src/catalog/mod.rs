use crate::error::{StoreError, StoreResult};
use crate::table::{Table, TableBuilder};
use linked_hash_map::LinkedHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Shared handle to one table.
///
/// Readers take the read lock, mutations hold the write lock across their
/// scan and their mutation.
pub type TableHandle = Arc<RwLock<Table>>;

/// Schema of a table as reported by `describe`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<String>,
    pub primary_key: Option<String>,
}

impl TableSchema {
    fn of(table: &Table) -> Self {
        Self {
            name: table.name().to_string(),
            columns: table.columns().to_vec(),
            primary_key: table.primary_key().map(str::to_string),
        }
    }
}

/// Mapping from table name to table, in creation order
pub struct TableStore {
    tables: RwLock<LinkedHashMap<String, TableHandle>>,
}

impl TableStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(LinkedHashMap::new()),
        }
    }

    /// Create an empty table.
    ///
    /// Nothing is registered unless every check passes.
    pub fn create_table(
        &self,
        name: &str,
        columns: Vec<String>,
        primary_key: Option<String>,
    ) -> StoreResult<TableHandle> {
        let mut tables = self.tables.write();
        if tables.contains_key(name) {
            return Err(StoreError::TableAlreadyExists(name.to_string()));
        }

        let table = TableBuilder::new(name)
            .columns(columns)
            .primary_key(primary_key)
            .try_build()?;

        info!(
            table = name,
            columns = table.column_count(),
            primary_key = table.primary_key().unwrap_or("none"),
            "created table"
        );

        let handle = Arc::new(RwLock::new(table));
        tables.insert(name.to_string(), handle.clone());
        Ok(handle)
    }

    pub fn get_table(&self, name: &str) -> StoreResult<TableHandle> {
        self.tables
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    /// Remove a table with all its records.
    ///
    /// The records are cleared through the handle as well, so a handle
    /// obtained earlier no longer reaches them.
    pub fn drop_table(&self, name: &str) -> StoreResult<()> {
        let handle = self
            .tables
            .write()
            .remove(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))?;

        let removed = handle.write().truncate();
        info!(table = name, records = removed, "dropped table");
        Ok(())
    }

    /// Clear a table's records, keeping its schema
    pub fn truncate_table(&self, name: &str) -> StoreResult<usize> {
        let handle = self.get_table(name)?;
        let removed = handle.write().truncate();
        info!(table = name, records = removed, "truncated table");
        Ok(removed)
    }

    pub fn describe(&self, name: &str) -> StoreResult<TableSchema> {
        let handle = self.get_table(name)?;
        let table = handle.read();
        Ok(TableSchema::of(&table))
    }

    /// Table names in creation order
    pub fn list_names(&self) -> Vec<String> {
        self.tables.read().keys().cloned().collect()
    }

    /// Table handles in creation order
    pub fn list_tables(&self) -> Vec<TableHandle> {
        self.tables.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }

    /// Drop every table
    pub fn clear(&self) {
        let mut tables = self.tables.write();
        for (_, handle) in tables.iter() {
            handle.write().truncate();
        }
        debug!(tables = tables.len(), "cleared table store");
        tables.clear();
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new()
    }
}
