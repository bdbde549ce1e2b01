use crate::types::{Cell, DecodedRecord};

/// An ordered tuple of field values used as a single lookup key.
///
/// Two keys are equal iff their value sequences are equal element-wise,
/// null-for-null included. There is no canonicalization beyond the field
/// list's declaration order, so distinct records whose lookup fields are all
/// absent collide to the same all-null key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey(Vec<Cell>);

impl CompositeKey {
    /// Builds the composite key of a record for the given ordered field list.
    ///
    /// Pure and total: a missing field contributes a [`Cell::Null`]
    /// placeholder at its position, preserving positional alignment with the
    /// field list. The same record and field list always produce an equal
    /// key.
    pub fn build(record: &DecodedRecord, lookup_fields: &[String]) -> Self {
        Self(
            lookup_fields
                .iter()
                .map(|field| record.cell(field))
                .collect(),
        )
    }

    /// Creates a key directly from its component cells.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    /// Returns the key components in field-list order.
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}
