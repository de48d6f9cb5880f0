//! TableBuilder for validated table construction
//!
//! Checks the schema before a table exists:
//! - Non-empty table name and column list
//! - Unique column names
//! - Primary key present in the column list

use crate::error::{StoreError, StoreResult};
use crate::table::Table;
use std::collections::HashSet;

/// Builder for constructing Table instances
///
/// # Example
/// ```
/// use recstore::table::TableBuilder;
///
/// let table = TableBuilder::new("users")
///     .column("id")
///     .column("name")
///     .primary_key(Some("id".to_string()))
///     .try_build()
///     .unwrap();
/// assert_eq!(table.primary_key(), Some("id"));
/// ```
#[derive(Debug)]
pub struct TableBuilder {
    name: String,
    columns: Vec<String>,
    primary_key: Option<String>,
}

impl TableBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
        }
    }

    /// Add a single column
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Add multiple columns at once
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Set the primary key column, `None` for no key
    pub fn primary_key(mut self, primary_key: Option<String>) -> Self {
        self.primary_key = primary_key;
        self
    }

    /// Build with validation
    pub fn try_build(self) -> StoreResult<Table> {
        if self.name.is_empty() {
            return Err(StoreError::invalid("table name cannot be empty"));
        }

        if self.columns.is_empty() {
            return Err(StoreError::invalid("table needs at least one column"));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.is_empty() {
                return Err(StoreError::invalid("column name cannot be empty"));
            }
            if !seen.insert(column.as_str()) {
                return Err(StoreError::DuplicateColumn(column.clone()));
            }
        }

        let primary_key = match &self.primary_key {
            Some(key) => Some(
                self.columns
                    .iter()
                    .position(|c| c == key)
                    .ok_or_else(|| StoreError::PrimaryKeyNotInColumns(key.clone()))?,
            ),
            None => None,
        };

        Ok(Table::new(self.name, self.columns, primary_key))
    }
}
