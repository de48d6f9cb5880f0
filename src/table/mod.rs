//! Table module for the record data model
//!
//! This module implements the in-memory tables with the following features:
//! - Records as positional sequences of text values
//! - Schema with ordered column names and an optional primary key
//! - Most-recent-first traversal with stable record ids

pub mod builder;
pub mod record;
pub mod table;

pub use builder::TableBuilder;
pub use record::Record;
pub use table::Table;
