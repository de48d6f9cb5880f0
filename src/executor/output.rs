//! Statement results and their text rendering

use crate::catalog::TableSchema;
use crate::types::NO_PRIMARY_KEY;
use comfy_table::{Cell, ContentArrangement, Table, presets};
use std::fmt;
use std::path::PathBuf;

/// Rows produced by `select`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    /// Labels of the projected columns
    pub columns: Vec<String>,
    /// Projected values, one inner vector per matching record
    pub rows: Vec<Vec<String>>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as a UTF-8 grid
    pub fn to_grid(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(self.columns.iter().map(Cell::new));

        for row in &self.rows {
            table.add_row(row.iter().map(Cell::new));
        }

        table.to_string()
    }
}

/// Result of one statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Created(String),
    Dropped(String),
    Truncated { table: String, records: usize },
    Inserted(usize),
    Updated(usize),
    Deleted(usize),
    Rows(ResultSet),
    Tables(Vec<String>),
    Schema(TableSchema),
    Saved(PathBuf),
    Loaded { path: PathBuf, tables: usize },
    NewDatabase,
    Exit,
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Created(_) => write!(f, "Table created successfully"),
            Output::Dropped(_) => write!(f, "Table dropped successfully"),
            Output::Truncated { .. } => write!(f, "Table truncated successfully"),
            Output::Inserted(n) => write!(f, "{} records inserted successfully", n),
            Output::Updated(n) => write!(f, "{} records updated successfully", n),
            Output::Deleted(n) => write!(f, "{} records deleted successfully", n),
            Output::Rows(rs) => write!(f, "{}", rs.to_grid()),
            Output::Tables(names) => write!(f, "{}", names.join("\n")),
            Output::Schema(schema) => write!(
                f,
                "{} ({}) primary key = {}",
                schema.name,
                schema.columns.join(", "),
                schema.primary_key.as_deref().unwrap_or(NO_PRIMARY_KEY)
            ),
            Output::Saved(path) => write!(f, "State saved successfully to {}", path.display()),
            Output::Loaded { path, tables } => write!(
                f,
                "State loaded successfully from {} ({} tables)",
                path.display(),
                tables
            ),
            Output::NewDatabase => write!(f, "New database created successfully"),
            Output::Exit => Ok(()),
        }
    }
}
