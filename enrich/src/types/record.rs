use serde_json::{Map, Value};

use crate::types::Cell;

/// One decoded reference or stream record: a field-name to value mapping.
///
/// Records are produced fresh per input line and make no totality guarantee
/// across lines; the schema may vary record to record. Field order follows
/// the order fields appeared in the input document.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    fields: Map<String, Value>,
}

impl DecodedRecord {
    /// Creates a record from an already-parsed field mapping.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns the raw value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field's value as an owned [`Cell`], with [`Cell::Null`]
    /// standing in for both an explicit null and an absent field.
    pub fn cell(&self, field: &str) -> Cell {
        self.fields.get(field).map(Cell::from_json).unwrap_or(Cell::Null)
    }

    /// Returns the field names in document order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the underlying field mapping.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns the number of fields in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for DecodedRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
