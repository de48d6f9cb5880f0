use serde::{Deserialize, Serialize};
use std::fmt;

/// Global type definitions
///
/// Identifiers, modes and constants shared by the store modules.
/// Record identifier, unique within its table for the table's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a multi-tuple insert reacts to a failing tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InsertMode {
    /// Tuples before the failing one stay inserted
    #[default]
    Partial,
    /// Every tuple is validated first; a failure inserts nothing
    Atomic,
}

/// Token introducing the primary key in `create`
pub const PRIMARY_KEY_PREFIX: &str = "primarykey=";

/// Primary key spelling for "no primary key"
pub const NO_PRIMARY_KEY: &str = "none";

/// Statement terminator
pub const STATEMENT_TERMINATOR: char = ';';

/// Snapshot file extension
pub const SNAPSHOT_EXT: &str = "json";

/// Snapshot layout version written into every file
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Password accepted when none is configured explicitly
pub const DEFAULT_PASSWORD: &str = "password";
