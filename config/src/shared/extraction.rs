use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Dimensional schema declared for one extraction operator.
///
/// Lists the logical names of the grouping keys and the measures the
/// downstream aggregation expects. Each declared name also doubles as the
/// default field-access expression for that name, used when the expression
/// maps in [`ExtractionConfig`] leave it unmapped.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DimensionalSchemaConfig {
    /// Logical names of the grouping keys, in declaration order.
    pub key_fields: Vec<String>,
    /// Logical names of the measures, in declaration order.
    pub measure_fields: Vec<String>,
}

impl DimensionalSchemaConfig {
    /// Validates dimensional schema settings.
    ///
    /// Ensures at least one key field is declared. A schema with no measures
    /// is allowed: pure grouping without aggregated values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key_fields.is_empty() {
            return Err(ValidationError::InvalidFieldValue {
                field: "key_fields".to_string(),
                constraint: "must declare at least one field".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration for dimensional field extraction.
///
/// The expression maps bind logical names from the dimensional schema to the
/// record field paths that supply their values. Entries the maps omit fall
/// back to the schema-derived defaults; entries they set take precedence.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExtractionConfig {
    /// The dimensional schema this operator extracts for.
    pub schema: DimensionalSchemaConfig,
    /// Logical key name to field-access expression overrides.
    #[serde(default)]
    pub key_expressions: BTreeMap<String, String>,
    /// Logical measure name to field-access expression overrides.
    #[serde(default)]
    pub measure_expressions: BTreeMap<String, String>,
}

impl ExtractionConfig {
    /// Validates extraction configuration settings.
    ///
    /// Checks the embedded schema and rejects expression entries with empty
    /// expressions, which could never compile into an accessor.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.schema.validate()?;

        for (name, expression) in self
            .key_expressions
            .iter()
            .chain(self.measure_expressions.iter())
        {
            if expression.is_empty() {
                return Err(ValidationError::InvalidFieldValue {
                    field: format!("expression for `{name}`"),
                    constraint: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ExtractionConfig {
        ExtractionConfig {
            schema: DimensionalSchemaConfig {
                key_fields: vec!["region".to_string()],
                measure_fields: vec!["amount".to_string()],
            },
            key_expressions: BTreeMap::new(),
            measure_expressions: BTreeMap::new(),
        }
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_accepts_schema_without_measures() {
        let mut config = valid_config();
        config.schema.measure_fields.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_schema_without_keys() {
        let mut config = valid_config();
        config.schema.key_fields.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_expression() {
        let mut config = valid_config();
        config
            .key_expressions
            .insert("region".to_string(), String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn expression_maps_default_to_empty() {
        let config: ExtractionConfig = serde_json::from_str(
            r#"{"schema": {"key_fields": ["region"], "measure_fields": ["amount"]}}"#,
        )
        .unwrap();

        assert!(config.key_expressions.is_empty());
        assert!(config.measure_expressions.is_empty());
    }
}
