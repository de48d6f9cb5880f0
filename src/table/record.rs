//! Record structure holding one row of text values

use crate::types::RecordId;

/// One row of a table
///
/// Values are positionally aligned with the owning table's columns:
/// the value at index `i` belongs to column `i`. A record may be shorter
/// than the schema; the trailing columns then have no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    values: Vec<String>,
}

impl Record {
    pub(crate) fn new(id: RecordId, values: Vec<String>) -> Self {
        Self { id, values }
    }

    /// Get record identifier
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Get all values in column order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Get the value at a column position, `None` if the record is too short
    pub fn value(&self, position: usize) -> Option<&str> {
        self.values.get(position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace the value at `position` in place.
    ///
    /// Returns `false` when the record has no value there; records are
    /// never resized.
    pub(crate) fn set(&mut self, position: usize, value: &str) -> bool {
        match self.values.get_mut(position) {
            Some(slot) => {
                value.clone_into(slot);
                true
            }
            None => false,
        }
    }
}
