use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Configuration for a file-backed enrichment lookup source.
///
/// Describes where the reference data lives and which fields of each
/// reference record form the composite lookup key and the enrichment payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EnrichmentSourceConfig {
    /// Path to the newline-delimited reference data file.
    ///
    /// Must resolve to exactly one readable regular file at load time.
    pub location: String,
    /// Ordered field names that compose the lookup key.
    ///
    /// Declaration order is significant: it defines the positional layout of
    /// every composite key built against this source.
    pub lookup_fields: Vec<String>,
    /// Ordered field names copied into the enrichment payload.
    ///
    /// When unset, the list is derived from the field set of the first
    /// successfully decoded reference record at load time.
    #[serde(default)]
    pub copy_fields: Option<Vec<String>>,
}

impl EnrichmentSourceConfig {
    /// Validates enrichment source configuration settings.
    ///
    /// Ensures a location is set, at least one lookup field is declared, and
    /// an explicit copy-field list, if present, is non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.location.is_empty() {
            return Err(ValidationError::InvalidFieldValue {
                field: "location".to_string(),
                constraint: "must not be empty".to_string(),
            });
        }

        if self.lookup_fields.is_empty() {
            return Err(ValidationError::InvalidFieldValue {
                field: "lookup_fields".to_string(),
                constraint: "must declare at least one field".to_string(),
            });
        }

        if self.copy_fields.as_ref().is_some_and(|fields| fields.is_empty()) {
            return Err(ValidationError::InvalidFieldValue {
                field: "copy_fields".to_string(),
                constraint: "must declare at least one field when set".to_string(),
            });
        }

        Ok(())
    }
}
