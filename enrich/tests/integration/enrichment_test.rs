use config::shared::EnrichmentSourceConfig;
use enrich::pipeline::EnrichmentPipeline;
use enrich::test_utils::{reference_file, test_record};
use enrich::types::Cell;
use telemetry::init_test_tracing;

fn source_config(location: &str, lookup_fields: &[&str]) -> EnrichmentSourceConfig {
    EnrichmentSourceConfig {
        location: location.to_string(),
        lookup_fields: lookup_fields.iter().map(|field| field.to_string()).collect(),
        copy_fields: None,
    }
}

#[test]
fn load_and_lookup_with_auto_derived_copy_fields_test() {
    init_test_tracing();

    let file = reference_file(&[
        r#"{"id":"1","region":"west","name":"Acme"}"#,
        r#"{"id":"2","region":"east","name":"Globex"}"#,
    ]);
    let config = source_config(file.path().to_str().unwrap(), &["id"]);

    let mut pipeline = EnrichmentPipeline::from_config(&config).unwrap();
    pipeline.connect().unwrap();

    let table = pipeline.table().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.copy_fields(), &["id", "region", "name"]);

    let payload = pipeline
        .lookup(&test_record(r#"{"id":"1","value":10}"#))
        .unwrap()
        .unwrap();
    assert_eq!(
        payload.values(),
        &[
            Cell::String("1".to_string()),
            Cell::String("west".to_string()),
            Cell::String("Acme".to_string()),
        ]
    );

    let payload = pipeline
        .lookup(&test_record(r#"{"id":"2"}"#))
        .unwrap()
        .unwrap();
    assert_eq!(
        payload.values(),
        &[
            Cell::String("2".to_string()),
            Cell::String("east".to_string()),
            Cell::String("Globex".to_string()),
        ]
    );
}

#[test]
fn explicit_copy_fields_shape_the_payload_test() {
    init_test_tracing();

    let file = reference_file(&[r#"{"id":"1","region":"west","name":"Acme"}"#]);
    let mut config = source_config(file.path().to_str().unwrap(), &["id"]);
    config.copy_fields = Some(vec!["name".to_string(), "region".to_string()]);

    let mut pipeline = EnrichmentPipeline::from_config(&config).unwrap();
    pipeline.connect().unwrap();

    let payload = pipeline
        .lookup(&test_record(r#"{"id":"1"}"#))
        .unwrap()
        .unwrap();
    assert_eq!(
        payload.values(),
        &[
            Cell::String("Acme".to_string()),
            Cell::String("west".to_string()),
        ]
    );
}

#[test]
fn multi_field_composite_keys_respect_declaration_order_test() {
    init_test_tracing();

    let file = reference_file(&[
        r#"{"id":"1","region":"west","name":"Acme"}"#,
        r#"{"id":"1","region":"east","name":"Globex"}"#,
    ]);
    let config = source_config(file.path().to_str().unwrap(), &["id", "region"]);

    let mut pipeline = EnrichmentPipeline::from_config(&config).unwrap();
    pipeline.connect().unwrap();

    // Same id, different region: distinct composite keys.
    assert_eq!(pipeline.table().unwrap().len(), 2);

    let payload = pipeline
        .lookup(&test_record(r#"{"id":"1","region":"east"}"#))
        .unwrap()
        .unwrap();
    assert_eq!(payload.values()[2], Cell::String("Globex".to_string()));
}

#[test]
fn malformed_lines_are_skipped_without_failing_the_load_test() {
    init_test_tracing();

    let file = reference_file(&[
        r#"{"id":"1","region":"west"}"#,
        "not json at all",
        r#"{"id":"2","region":"east"}"#,
    ]);
    let config = source_config(file.path().to_str().unwrap(), &["id"]);

    let mut pipeline = EnrichmentPipeline::from_config(&config).unwrap();
    pipeline.connect().unwrap();

    assert_eq!(pipeline.table().unwrap().len(), 2);
}

#[test]
fn connecting_against_a_directory_fails_without_a_table_test() {
    init_test_tracing();

    let dir = tempfile::tempdir().unwrap();
    let config = source_config(dir.path().to_str().unwrap(), &["id"]);

    let mut pipeline = EnrichmentPipeline::from_config(&config).unwrap();
    assert!(pipeline.connect().is_err());
    assert!(!pipeline.is_connected());
    assert!(pipeline.table().is_none());
}
