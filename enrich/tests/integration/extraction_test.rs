use std::collections::BTreeMap;

use config::shared::{DimensionalSchemaConfig, ExtractionConfig};
use enrich::pipeline::DimensionalExtractor;
use enrich::test_utils::test_record;
use enrich::types::Cell;
use telemetry::init_test_tracing;

fn extraction_config(
    key_fields: &[&str],
    measure_fields: &[&str],
    key_overrides: &[(&str, &str)],
) -> ExtractionConfig {
    ExtractionConfig {
        schema: DimensionalSchemaConfig {
            key_fields: key_fields.iter().map(|field| field.to_string()).collect(),
            measure_fields: measure_fields
                .iter()
                .map(|field| field.to_string())
                .collect(),
        },
        key_expressions: key_overrides
            .iter()
            .map(|(name, expression)| (name.to_string(), expression.to_string()))
            .collect(),
        measure_expressions: BTreeMap::new(),
    }
}

#[test]
fn extracts_keys_and_measures_with_schema_defaults_test() {
    init_test_tracing();

    let config = extraction_config(&["region"], &["amount", "count"], &[]);
    let mut extractor = DimensionalExtractor::from_config(&config).unwrap();

    let record = test_record(r#"{"region": "west", "amount": 12.5, "count": 3}"#);
    let extracted = extractor.extract(&record).unwrap();

    assert_eq!(extracted.key_values(), &[Cell::String("west".to_string())]);
    // Measures come back in lexicographic logical-name order.
    assert_eq!(
        extracted.measure_values(),
        &[Cell::F64(12.5), Cell::I64(3)]
    );
}

#[test]
fn user_expressions_override_schema_defaults_test() {
    init_test_tracing();

    let config = extraction_config(&["region"], &["amount"], &[("region", "geo.region")]);
    let mut extractor = DimensionalExtractor::from_config(&config).unwrap();

    let record = test_record(r#"{"geo": {"region": "west"}, "amount": 1, "region": "ignored"}"#);
    let extracted = extractor.extract(&record).unwrap();

    assert_eq!(extracted.key_values(), &[Cell::String("west".to_string())]);
}

#[test]
fn extraction_is_stable_across_a_record_stream_test() {
    init_test_tracing();

    let config = extraction_config(&["region"], &["amount"], &[]);
    let mut extractor = DimensionalExtractor::from_config(&config).unwrap();

    let records = [
        r#"{"region": "west", "amount": 1}"#,
        r#"{"region": "east", "amount": 2}"#,
        r#"{"region": "west", "amount": 3}"#,
    ];

    let mut totals: BTreeMap<String, i64> = BTreeMap::new();
    for record in records {
        let extracted = extractor.extract(&test_record(record)).unwrap();
        let Cell::String(region) = &extracted.key_values()[0] else {
            panic!("expected a text key");
        };
        let Cell::I64(amount) = extracted.measure_values()[0] else {
            panic!("expected an integer measure");
        };
        *totals.entry(region.clone()).or_default() += amount;
    }

    assert_eq!(totals.get("west"), Some(&4));
    assert_eq!(totals.get("east"), Some(&2));
}

#[test]
fn unknown_expression_field_fails_compilation_test() {
    init_test_tracing();

    let config = extraction_config(&["region"], &["amount"], &[("region", "missing_field")]);
    let mut extractor = DimensionalExtractor::from_config(&config).unwrap();

    let record = test_record(r#"{"region": "west", "amount": 1}"#);
    assert!(extractor.extract(&record).is_err());
}
