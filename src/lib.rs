//! Recstore record store library
//!
//! A single-process table engine driven by a small line-oriented command
//! language. Values are opaque text; lookups are full scans.

// Global type definitions
pub mod error;
pub mod types;

// Data model and storage
pub mod catalog;
pub mod table;

// Command language
pub mod predicate;
pub mod sql;

// Execution, persistence and sessions
pub mod config;
pub mod executor;
pub mod session;
pub mod snapshot;

pub use catalog::{TableSchema, TableStore};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use executor::{Executor, Output, ResultSet};
pub use session::Session;
