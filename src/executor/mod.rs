//! Query Executor module
//!
//! Runs parsed statements against a [`TableStore`]. Every mutating
//! operation holds the table's write lock from its scan to its last write.

pub mod output;

pub use output::{Output, ResultSet};

use crate::catalog::{TableSchema, TableStore};
use crate::error::{StoreError, StoreResult};
use crate::predicate::{WhereClause, matching_ids};
use crate::sql::{Projection, Statement};
use crate::table::Record;
use crate::types::{InsertMode, RecordId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

pub struct Executor {
    store: TableStore,
    insert_mode: InsertMode,
}

impl Executor {
    pub fn new(store: TableStore) -> Self {
        Self {
            store,
            insert_mode: InsertMode::default(),
        }
    }

    pub fn with_insert_mode(mut self, insert_mode: InsertMode) -> Self {
        self.insert_mode = insert_mode;
        self
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    pub fn insert_mode(&self) -> InsertMode {
        self.insert_mode
    }

    /// Swap in a different store, returning the old one
    pub fn replace_store(&mut self, store: TableStore) -> TableStore {
        std::mem::replace(&mut self.store, store)
    }

    /// Execute one table statement.
    ///
    /// `save`, `load`, `new` and `exit` act on the session, not on the
    /// store, and are rejected here.
    pub fn execute(&self, stmt: Statement) -> StoreResult<Output> {
        match stmt {
            Statement::CreateTable(ct) => {
                self.create_table(&ct.table_name, ct.columns, ct.primary_key)?;
                Ok(Output::Created(ct.table_name))
            }
            Statement::DropTable(name) => {
                self.drop_table(&name)?;
                Ok(Output::Dropped(name))
            }
            Statement::Truncate(name) => {
                let records = self.truncate_table(&name)?;
                Ok(Output::Truncated { table: name, records })
            }
            Statement::Describe(name) => self.describe(&name).map(Output::Schema),
            Statement::ShowTables => Ok(Output::Tables(self.list_tables())),
            Statement::Insert(ins) => self.insert(&ins.table_name, ins.rows).map(Output::Inserted),
            Statement::Select(sel) => self
                .select(&sel.table_name, &sel.projection, sel.where_clause.as_ref())
                .map(Output::Rows),
            Statement::Update(upd) => self
                .update(&upd.table_name, &upd.assignments, upd.where_clause.as_ref())
                .map(Output::Updated),
            Statement::Delete(del) => self
                .delete(&del.table_name, del.where_clause.as_ref())
                .map(Output::Deleted),
            Statement::Save(_) | Statement::Load(_) | Statement::NewDatabase | Statement::Exit => {
                Err(StoreError::invalid("command is only available in a session"))
            }
        }
    }

    pub fn create_table(
        &self,
        name: &str,
        columns: Vec<String>,
        primary_key: Option<String>,
    ) -> StoreResult<()> {
        self.store.create_table(name, columns, primary_key).map(|_| ())
    }

    pub fn drop_table(&self, name: &str) -> StoreResult<()> {
        self.store.drop_table(name)
    }

    pub fn truncate_table(&self, name: &str) -> StoreResult<usize> {
        self.store.truncate_table(name)
    }

    pub fn describe(&self, name: &str) -> StoreResult<TableSchema> {
        self.store.describe(name)
    }

    pub fn list_tables(&self) -> Vec<String> {
        self.store.list_names()
    }

    /// Insert tuples in order; each becomes the new head of the table.
    ///
    /// In [`InsertMode::Partial`] a failing tuple aborts the call but the
    /// tuples before it stay inserted. In [`InsertMode::Atomic`] nothing is
    /// inserted unless every tuple passes.
    pub fn insert(&self, name: &str, rows: Vec<Vec<String>>) -> StoreResult<usize> {
        let handle = self.store.get_table(name)?;
        let mut table = handle.write();
        let total = rows.len();

        match self.insert_mode {
            InsertMode::Partial => {
                for (inserted, row) in rows.into_iter().enumerate() {
                    if let Err(e) = table.insert(row) {
                        if inserted > 0 {
                            warn!(table = name, inserted, total, "insert aborted after partial success");
                        }
                        return Err(e);
                    }
                }
            }
            InsertMode::Atomic => {
                let mut staged = table.clone();
                for row in rows {
                    staged.insert(row)?;
                }
                *table = staged;
            }
        }

        debug!(table = name, records = total, "inserted");
        Ok(total)
    }

    /// Project matching records onto the selected columns, in schema order
    pub fn select(
        &self,
        name: &str,
        projection: &Projection,
        clause: Option<&WhereClause>,
    ) -> StoreResult<ResultSet> {
        let handle = self.store.get_table(name)?;
        let table = handle.read();

        let positions: Vec<usize> = match projection {
            Projection::All => (0..table.column_count()).collect(),
            Projection::Columns(columns) => {
                let mut positions = columns
                    .iter()
                    .map(|c| table.column_position(c))
                    .collect::<StoreResult<Vec<_>>>()?;
                positions.sort_unstable();
                positions.dedup();
                positions
            }
        };

        let ids = matching_ids(&table, clause)?;
        let by_id: HashMap<RecordId, &Record> = table.records().map(|r| (r.id(), r)).collect();

        let rows = ids
            .iter()
            .filter_map(|id| by_id.get(id))
            .map(|record| {
                positions
                    .iter()
                    .map(|&pos| record.value(pos).unwrap_or_default().to_string())
                    .collect()
            })
            .collect::<Vec<Vec<String>>>();

        debug!(table = name, rows = rows.len(), "selected");
        Ok(ResultSet {
            columns: positions.iter().map(|&pos| table.columns()[pos].clone()).collect(),
            rows,
        })
    }

    /// Assign values on every matching record. The primary key is not
    /// re-checked.
    pub fn update(
        &self,
        name: &str,
        assignments: &[(String, String)],
        clause: Option<&WhereClause>,
    ) -> StoreResult<usize> {
        let handle = self.store.get_table(name)?;
        let mut table = handle.write();

        let resolved = assignments
            .iter()
            .map(|(col, val)| Ok((table.column_position(col)?, val.clone())))
            .collect::<StoreResult<Vec<_>>>()?;

        let ids: HashSet<RecordId> = matching_ids(&table, clause)?.into_iter().collect();
        let updated = table.update(&ids, &resolved);

        debug!(table = name, records = updated, "updated");
        Ok(updated)
    }

    pub fn delete(&self, name: &str, clause: Option<&WhereClause>) -> StoreResult<usize> {
        let handle = self.store.get_table(name)?;
        let mut table = handle.write();

        let ids: HashSet<RecordId> = matching_ids(&table, clause)?.into_iter().collect();
        let deleted = table.delete(&ids);

        debug!(table = name, records = deleted, "deleted");
        Ok(deleted)
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(TableStore::new())
    }
}
