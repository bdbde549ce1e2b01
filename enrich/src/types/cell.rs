use std::hash::{Hash, Hasher};

use serde_json::Value;

/// A loosely-typed value extracted from a decoded record.
///
/// [`Cell`] is the owned representation used for composite key components and
/// enrichment payload values. Scalars get their own variants; nested arrays
/// and objects ride in [`Cell::Json`] untouched.
///
/// Unlike [`serde_json::Value`], cells implement [`Eq`] and [`Hash`] so they
/// can compose hash-map keys: floats compare and hash by bit pattern, and
/// nested JSON hashes a key-sorted traversal consistent with its
/// order-insensitive object equality.
#[derive(Debug, Clone)]
pub enum Cell {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(String),
    Json(Value),
}

impl Cell {
    /// Converts a borrowed JSON value into an owned cell.
    ///
    /// Numbers prefer the narrowest lossless variant: `i64`, then `u64`,
    /// then `f64`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(value) => Cell::Bool(*value),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Cell::I64(value)
                } else if let Some(value) = number.as_u64() {
                    Cell::U64(value)
                } else {
                    // `as_f64` is total for any number serde_json can parse.
                    Cell::F64(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(value) => Cell::String(value.clone()),
            Value::Array(_) | Value::Object(_) => Cell::Json(value.clone()),
        }
    }

    /// Returns whether this cell is the null placeholder.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Cell) -> bool {
        match (self, other) {
            (Cell::Null, Cell::Null) => true,
            (Cell::Bool(a), Cell::Bool(b)) => a == b,
            (Cell::I64(a), Cell::I64(b)) => a == b,
            (Cell::U64(a), Cell::U64(b)) => a == b,
            // Bit comparison keeps equality reflexive (NaN == NaN) and
            // consistent with `Hash`.
            (Cell::F64(a), Cell::F64(b)) => a.to_bits() == b.to_bits(),
            (Cell::String(a), Cell::String(b)) => a == b,
            (Cell::Json(a), Cell::Json(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Null => {}
            Cell::Bool(value) => value.hash(state),
            Cell::I64(value) => value.hash(state),
            Cell::U64(value) => value.hash(state),
            Cell::F64(value) => value.to_bits().hash(state),
            Cell::String(value) => value.hash(state),
            Cell::Json(value) => hash_json(value, state),
        }
    }
}

/// Hashes a JSON value consistently with [`serde_json::Value`] equality.
///
/// Object keys are visited in sorted order because object equality is
/// insensitive to insertion order.
fn hash_json<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(value) => {
            1u8.hash(state);
            value.hash(state);
        }
        Value::Number(number) => {
            2u8.hash(state);
            number.to_string().hash(state);
        }
        Value::String(value) => {
            3u8.hash(state);
            value.hash(state);
        }
        Value::Array(values) => {
            4u8.hash(state);
            values.len().hash(state);
            for value in values {
                hash_json(value, state);
            }
        }
        Value::Object(entries) => {
            5u8.hash(state);
            entries.len().hash(state);
            let mut keys: Vec<&String> = entries.keys().collect();
            keys.sort();
            for key in keys {
                key.hash(state);
                hash_json(&entries[key.as_str()], state);
            }
        }
    }
}
