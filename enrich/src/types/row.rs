use crate::types::{Cell, DecodedRecord};

/// The enrichment payload for one reference record.
///
/// [`PayloadRow`] holds the values of the configured copy fields, in
/// copy-field declaration order. Fields the record lacks are represented by
/// [`Cell::Null`] so every payload built against the same copy-field list has
/// the same number of positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadRow {
    values: Vec<Cell>,
}

impl PayloadRow {
    /// Creates a payload row with the given values.
    pub fn new(values: Vec<Cell>) -> Self {
        Self { values }
    }

    /// Projects the copy fields of a record into a payload row.
    pub fn project(record: &DecodedRecord, copy_fields: &[String]) -> Self {
        Self::new(
            copy_fields
                .iter()
                .map(|field| record.cell(field))
                .collect(),
        )
    }

    /// Returns the payload values in copy-field order.
    pub fn values(&self) -> &[Cell] {
        &self.values
    }

    /// Consumes the row and returns its values in copy-field order.
    pub fn into_values(self) -> Vec<Cell> {
        self.values
    }

    /// Returns the number of positions in this payload.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the payload has no positions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn project_preserves_copy_field_order_and_pads_nulls() {
        let Value::Object(fields) = json!({"region": "west", "id": "1"}) else {
            unreachable!()
        };
        let record = DecodedRecord::new(fields);
        let copy_fields = vec!["id".to_string(), "name".to_string(), "region".to_string()];

        let payload = PayloadRow::project(&record, &copy_fields);

        assert_eq!(
            payload.values(),
            &[
                Cell::String("1".to_string()),
                Cell::Null,
                Cell::String("west".to_string()),
            ]
        );
    }
}
