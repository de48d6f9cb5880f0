//! Store error definitions

use thiserror::Error;

/// Store error types
///
/// Every command either succeeds or fails with exactly one of these.
/// None of them is fatal: the caller reports the error and moves on to
/// the next command.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No table with this name
    #[error("Table does not exist: {0}")]
    TableNotFound(String),
    /// A table with this name is already present
    #[error("Table already exists: {0}")]
    TableAlreadyExists(String),
    /// Declared primary key is not one of the table's columns
    #[error("Primary key not in columns: {0}")]
    PrimaryKeyNotInColumns(String),
    /// Column list names the same column twice
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
    /// Column referenced by a command is not in the schema
    #[error("Column does not exist: {0}")]
    ColumnNotFound(String),
    /// Inserted primary key value already held by another record
    #[error("Duplicate primary key: {0}")]
    PrimaryKeyViolation(String),
    /// Tuple wider than the table
    #[error("Too many values: got {got}, table has {expected} columns")]
    TooManyValues { expected: usize, got: usize },
    /// Condition contains none of the recognised operators
    #[error("No operator found in condition: {0}")]
    NoOperatorFound(String),
    /// Command does not follow the grammar
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    /// I/O error while reading or writing a snapshot
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Snapshot file is not valid JSON for the snapshot layout
    #[error("Snapshot format error: {0}")]
    Snapshot(#[from] serde_json::Error),
    /// Snapshot checksum or version does not match its contents
    #[error("Snapshot corrupted: {0}")]
    SnapshotCorrupted(String),
}

impl StoreError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        StoreError::InvalidCommand(msg.into())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::TableAlreadyExists("users".to_string());
        assert_eq!(err.to_string(), "Table already exists: users");

        let err = StoreError::TooManyValues {
            expected: 2,
            got: 3,
        };
        assert_eq!(err.to_string(), "Too many values: got 3, table has 2 columns");
    }

    #[test]
    fn test_store_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));
    }
}
