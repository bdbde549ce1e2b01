use std::collections::HashMap;

use crate::types::{CompositeKey, PayloadRow};

/// In-memory mapping from composite key to enrichment payload.
///
/// Built once per load cycle by [`crate::lookup::FileLookupLoader`] and
/// read-only afterwards; no insert or update operation exists post-load, and
/// no periodic reload policy applies ([`EnrichmentTable::needs_refresh`] is
/// constant false). If the surrounding system parallelizes record
/// processing, the table is safe to share read-only across workers.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentTable {
    entries: HashMap<CompositeKey, PayloadRow>,
    copy_fields: Vec<String>,
}

impl EnrichmentTable {
    /// Creates a table from fully-built entries and the copy-field list that
    /// shaped the payloads.
    pub fn new(entries: HashMap<CompositeKey, PayloadRow>, copy_fields: Vec<String>) -> Self {
        Self {
            entries,
            copy_fields,
        }
    }

    /// Looks up the payload for a composite key.
    pub fn get(&self, key: &CompositeKey) -> Option<&PayloadRow> {
        self.entries.get(key)
    }

    /// Returns the ordered field names the payloads were projected from.
    pub fn copy_fields(&self) -> &[String] {
        &self.copy_fields
    }

    /// Returns the number of distinct composite keys in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reports whether the table needs a periodic reload.
    ///
    /// Always false: this implementation has no refresh policy. A new table
    /// is built by running another load cycle.
    pub fn needs_refresh(&self) -> bool {
        false
    }
}
