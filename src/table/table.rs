//! Table structure: schema plus record collection

use crate::error::{StoreError, StoreResult};
use crate::table::Record;
use crate::types::RecordId;
use std::collections::HashSet;

/// A named schema together with its records
///
/// - columns: ordered, unique column names; fixed after creation
/// - primary_key: optional position of the key column; fixed after creation
/// - records: kept oldest first internally, traversed newest first
///
/// Record ids come from a counter that is never rewound, so an id taken
/// before a `truncate` cannot resolve to a record inserted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    primary_key: Option<usize>,
    records: Vec<Record>,
    next_record_id: u64,
}

impl Table {
    /// Create an empty table. Use [`TableBuilder`](crate::table::TableBuilder)
    /// to get the schema validated.
    pub(crate) fn new(name: String, columns: Vec<String>, primary_key: Option<usize>) -> Self {
        Self {
            name,
            columns,
            primary_key,
            records: Vec::new(),
            next_record_id: 1,
        }
    }

    /// Get table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get column names in schema order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get column count
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get primary key column name
    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.map(|pos| self.columns[pos].as_str())
    }

    /// Get primary key column position
    pub fn primary_key_position(&self) -> Option<usize> {
        self.primary_key
    }

    /// Resolve a column name to its position
    pub fn column_position(&self, column: &str) -> StoreResult<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| StoreError::ColumnNotFound(column.to_string()))
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in traversal order, most recently inserted first
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().rev()
    }

    /// Look up a record by id
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Check a tuple against the schema width and the primary key.
    ///
    /// The key check is a full scan of the current records.
    pub fn check_tuple(&self, values: &[String]) -> StoreResult<()> {
        if values.len() > self.columns.len() {
            return Err(StoreError::TooManyValues {
                expected: self.columns.len(),
                got: values.len(),
            });
        }

        if let Some(pos) = self.primary_key {
            let key = values.get(pos).map(String::as_str);
            if self.records.iter().any(|r| r.value(pos) == key) {
                return Err(StoreError::PrimaryKeyViolation(
                    key.unwrap_or_default().to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Validate and insert a tuple as the new head of the traversal order
    pub fn insert(&mut self, values: Vec<String>) -> StoreResult<RecordId> {
        self.check_tuple(&values)?;

        let id = RecordId(self.next_record_id);
        self.next_record_id += 1;
        self.records.push(Record::new(id, values));
        Ok(id)
    }

    /// Apply `(position, value)` assignments to every record in `ids`.
    ///
    /// The primary key is not re-checked. Returns the number of matched
    /// records, including short records that had no slot for an assigned
    /// column and were left as they were.
    pub fn update(&mut self, ids: &HashSet<RecordId>, assignments: &[(usize, String)]) -> usize {
        let mut updated = 0;
        for record in self.records.iter_mut().filter(|r| ids.contains(&r.id())) {
            for (pos, value) in assignments {
                record.set(*pos, value);
            }
            updated += 1;
        }
        updated
    }

    /// Remove every record in `ids`, keeping the order of the rest
    pub fn delete(&mut self, ids: &HashSet<RecordId>) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !ids.contains(&r.id()));
        before - self.records.len()
    }

    /// Remove all records; schema is kept
    pub fn truncate(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }
}
