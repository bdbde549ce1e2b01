use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::types::DecodedRecord;

/// The kind of value a record field holds.
///
/// [`FieldKind::Map`] carries the nested shape so expression paths can be
/// validated through it at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Null,
    Bool,
    Integer,
    Float,
    Text,
    List,
    Map(RecordShape),
}

impl FieldKind {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => FieldKind::Null,
            Value::Bool(_) => FieldKind::Bool,
            Value::Number(number) => {
                if number.is_f64() {
                    FieldKind::Float
                } else {
                    FieldKind::Integer
                }
            }
            Value::String(_) => FieldKind::Text,
            Value::Array(_) => FieldKind::List,
            Value::Object(fields) => FieldKind::Map(RecordShape::of_fields(fields)),
        }
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Null => "null",
            FieldKind::Bool => "bool",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Text => "text",
            FieldKind::List => "list",
            FieldKind::Map(_) => "map",
        }
    }
}

/// Descriptor of a record's runtime shape: its field names and kinds, nested
/// mappings included.
///
/// Derived from a sample record, usually the first record an operator
/// instance sees. The design assumes one fixed shape per operator instance
/// for its lifetime; see
/// [`crate::extract::FieldAccessorRegistry`] for the caching consequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordShape {
    fields: BTreeMap<String, FieldKind>,
}

impl RecordShape {
    /// Derives the shape of a sample record.
    pub fn of(record: &DecodedRecord) -> Self {
        Self::of_fields(record.fields())
    }

    fn of_fields(fields: &Map<String, Value>) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(name, value)| (name.clone(), FieldKind::of(value)))
                .collect(),
        }
    }

    /// Returns the kind of a field, if the shape has it.
    pub fn field(&self, name: &str) -> Option<&FieldKind> {
        self.fields.get(name)
    }

    /// Returns the number of fields in the shape.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the shape has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
