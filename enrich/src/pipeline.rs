//! Public surface consumed by the surrounding stream runtime.
//!
//! [`EnrichmentPipeline`] covers the lookup side: one-shot reference load at
//! connect time, per-record exact-match lookup afterwards.
//! [`DimensionalExtractor`] covers the extraction side: accessor compilation
//! on the first record, positional key/measure extraction on every record.
//! Both are invoked from a single-threaded record-processing path and
//! perform no I/O outside [`EnrichmentPipeline::connect`].

use config::shared::{DimensionalSchemaConfig, EnrichmentSourceConfig, ExtractionConfig};
use tracing::{debug, info};

use crate::enrich_error;
use crate::error::{EnrichResult, ErrorKind};
use crate::extract::{
    ExpressionMap, FieldAccessorRegistry, RecordShape, merge_expression_maps,
};
use crate::lookup::{EnrichmentTable, FileLookupLoader};
use crate::types::{Cell, CompositeKey, DecodedRecord, PayloadRow};

/// Facade over the composite-key lookup cache.
///
/// The reference table is loaded once per connect cycle and is read-only
/// until [`EnrichmentPipeline::disconnect`] releases it. There is no
/// periodic reload: [`EnrichmentPipeline::needs_refresh`] always answers
/// false, and a caller that wants fresh data runs another connect cycle.
#[derive(Debug)]
pub struct EnrichmentPipeline {
    loader: FileLookupLoader,
    table: Option<EnrichmentTable>,
}

impl EnrichmentPipeline {
    /// Creates a pipeline from validated configuration.
    pub fn from_config(config: &EnrichmentSourceConfig) -> EnrichResult<Self> {
        Ok(Self::new(FileLookupLoader::from_config(config)?))
    }

    /// Creates a pipeline around an existing loader.
    pub fn new(loader: FileLookupLoader) -> Self {
        Self {
            loader,
            table: None,
        }
    }

    /// Loads the reference table for this connect cycle.
    ///
    /// Blocks until the whole reference source is consumed or a fatal fault
    /// occurs; on failure no table is installed and any previously loaded
    /// table is kept.
    pub fn connect(&mut self) -> EnrichResult<()> {
        let table = self.loader.load()?;
        info!(entries = table.len(), "enrichment pipeline connected");
        self.table = Some(table);

        Ok(())
    }

    /// Returns whether a reference table is currently loaded.
    pub fn is_connected(&self) -> bool {
        self.table.is_some()
    }

    /// Looks up the enrichment payload for a record.
    ///
    /// Builds the record's composite key from the configured lookup fields
    /// and consults the table. Returns `Ok(None)` on a miss and fails with
    /// [`ErrorKind::InvalidState`] when called before [`Self::connect`].
    pub fn lookup(&self, record: &DecodedRecord) -> EnrichResult<Option<&PayloadRow>> {
        let key = CompositeKey::build(record, self.loader.lookup_fields());
        self.lookup_key(&key)
    }

    /// Looks up the enrichment payload for an already-built composite key.
    pub fn lookup_key(&self, key: &CompositeKey) -> EnrichResult<Option<&PayloadRow>> {
        match &self.table {
            Some(table) => Ok(table.get(key)),
            None => Err(enrich_error!(
                ErrorKind::InvalidState,
                "Lookup issued before the reference table was loaded"
            )),
        }
    }

    /// Returns the loaded table, if any.
    pub fn table(&self) -> Option<&EnrichmentTable> {
        self.table.as_ref()
    }

    /// Reports whether the reference table needs a periodic reload.
    ///
    /// Constant false for this implementation.
    pub fn needs_refresh(&self) -> bool {
        false
    }

    /// Releases the loaded table and all held resources.
    pub fn disconnect(&mut self) {
        self.table = None;
        debug!("enrichment pipeline disconnected");
    }
}

/// Dimensional schema declared for one extraction operator.
///
/// Supplies the schema-derived default expression maps: every declared key
/// and measure name defaults to the expression reading the record field of
/// the same name.
#[derive(Debug, Clone)]
pub struct DimensionalSchema {
    key_fields: Vec<String>,
    measure_fields: Vec<String>,
}

impl DimensionalSchema {
    /// Creates a schema from its configuration.
    pub fn from_config(config: &DimensionalSchemaConfig) -> Self {
        Self {
            key_fields: config.key_fields.clone(),
            measure_fields: config.measure_fields.clone(),
        }
    }

    /// Returns the default key expression map.
    pub fn default_key_expressions(&self) -> ExpressionMap {
        identity_expressions(&self.key_fields)
    }

    /// Returns the default measure expression map.
    pub fn default_measure_expressions(&self) -> ExpressionMap {
        identity_expressions(&self.measure_fields)
    }
}

fn identity_expressions(fields: &[String]) -> ExpressionMap {
    fields
        .iter()
        .map(|field| (field.clone(), field.clone()))
        .collect()
}

/// Key and measure values extracted from one record.
///
/// Values align positionally with the respective accessor sets' name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDimensions {
    key_values: Vec<Cell>,
    measure_values: Vec<Cell>,
}

impl ExtractedDimensions {
    /// Returns the grouping key values.
    pub fn key_values(&self) -> &[Cell] {
        &self.key_values
    }

    /// Returns the measure values.
    pub fn measure_values(&self) -> &[Cell] {
        &self.measure_values
    }

    /// Consumes the extraction and returns `(keys, measures)`.
    pub fn into_parts(self) -> (Vec<Cell>, Vec<Cell>) {
        (self.key_values, self.measure_values)
    }
}

/// Facade over dimensional field extraction.
///
/// Built from an [`ExtractionConfig`]: the user expression maps are merged
/// against the schema-derived defaults up front (user entries win). The
/// first extracted record supplies the shape both accessor sets compile
/// against; every later record reuses the compiled sets, so one extractor
/// instance serves records of one fixed shape for its lifetime.
#[derive(Debug)]
pub struct DimensionalExtractor {
    key_expressions: ExpressionMap,
    measure_expressions: ExpressionMap,
    key_registry: FieldAccessorRegistry,
    measure_registry: FieldAccessorRegistry,
}

impl DimensionalExtractor {
    /// Creates an extractor from validated configuration.
    pub fn from_config(config: &ExtractionConfig) -> EnrichResult<Self> {
        config.validate()?;
        let schema = DimensionalSchema::from_config(&config.schema);

        Ok(Self::new(
            merge_expression_maps(&config.key_expressions, &schema.default_key_expressions()),
            merge_expression_maps(
                &config.measure_expressions,
                &schema.default_measure_expressions(),
            ),
        ))
    }

    /// Creates an extractor from already-merged expression maps.
    pub fn new(key_expressions: ExpressionMap, measure_expressions: ExpressionMap) -> Self {
        Self {
            key_expressions,
            measure_expressions,
            key_registry: FieldAccessorRegistry::new(),
            measure_registry: FieldAccessorRegistry::new(),
        }
    }

    /// Returns the merged key expression map.
    pub fn key_expressions(&self) -> &ExpressionMap {
        &self.key_expressions
    }

    /// Returns the merged measure expression map.
    pub fn measure_expressions(&self) -> &ExpressionMap {
        &self.measure_expressions
    }

    /// Extracts key and measure values from a record.
    ///
    /// The first call compiles both accessor sets against this record's
    /// shape as a side effect; compile failures surface here and persist for
    /// the instance. A per-record accessor failure (the record deviating
    /// from the compiled shape) propagates to the caller, which owns the
    /// drop-or-halt policy. The record itself is never mutated.
    pub fn extract(&mut self, record: &DecodedRecord) -> EnrichResult<ExtractedDimensions> {
        // The registries ignore the shape argument once compiled, so shape
        // derivation is skipped on the hot path after the first record.
        let shape = if self.key_registry.is_compiled() && self.measure_registry.is_compiled() {
            RecordShape::default()
        } else {
            RecordShape::of(record)
        };

        let key_values = self
            .key_registry
            .accessors(&self.key_expressions, &shape)?
            .read_all(record)?;
        let measure_values = self
            .measure_registry
            .accessors(&self.measure_expressions, &shape)?
            .read_all(record)?;

        Ok(ExtractedDimensions {
            key_values,
            measure_values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{reference_file, test_record};
    use std::collections::BTreeMap;

    fn pipeline_for(path: &std::path::Path) -> EnrichmentPipeline {
        EnrichmentPipeline::new(FileLookupLoader::new(
            path.to_str().unwrap(),
            vec!["id".to_string()],
            None,
        ))
    }

    fn extraction_config() -> ExtractionConfig {
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
    fn lookup_before_connect_fails() {
        let file = reference_file(&[r#"{"id":"1"}"#]);
        let pipeline = pipeline_for(file.path());

        let error = pipeline.lookup(&test_record(r#"{"id":"1"}"#)).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn connect_then_lookup_hits_and_misses() {
        let file = reference_file(&[
            r#"{"id":"1","region":"west","name":"Acme"}"#,
            r#"{"id":"2","region":"east","name":"Globex"}"#,
        ]);
        let mut pipeline = pipeline_for(file.path());
        pipeline.connect().unwrap();

        let hit = pipeline.lookup(&test_record(r#"{"id":"2"}"#)).unwrap();
        assert_eq!(
            hit.unwrap().values()[2],
            Cell::String("Globex".to_string())
        );

        let miss = pipeline.lookup(&test_record(r#"{"id":"3"}"#)).unwrap();
        assert!(miss.is_none());
    }

    #[test]
    fn needs_refresh_is_constant_false() {
        let file = reference_file(&[r#"{"id":"1"}"#]);
        let mut pipeline = pipeline_for(file.path());

        assert!(!pipeline.needs_refresh());
        pipeline.connect().unwrap();
        assert!(!pipeline.needs_refresh());
    }

    #[test]
    fn disconnect_releases_the_table() {
        let file = reference_file(&[r#"{"id":"1"}"#]);
        let mut pipeline = pipeline_for(file.path());
        pipeline.connect().unwrap();
        assert!(pipeline.is_connected());

        pipeline.disconnect();

        assert!(!pipeline.is_connected());
        assert!(pipeline.lookup(&test_record(r#"{"id":"1"}"#)).is_err());
    }

    #[test]
    fn schema_defaults_fill_unmapped_names() {
        let mut config = extraction_config();
        config
            .key_expressions
            .insert("region".to_string(), "geo.region".to_string());

        let extractor = DimensionalExtractor::from_config(&config).unwrap();

        // The user override wins for `region`; the measure falls back to the
        // schema-derived identity expression.
        assert_eq!(
            extractor.key_expressions().get("region").map(String::as_str),
            Some("geo.region")
        );
        assert_eq!(
            extractor
                .measure_expressions()
                .get("amount")
                .map(String::as_str),
            Some("amount")
        );
    }

    #[test]
    fn extract_returns_aligned_key_and_measure_values() {
        let mut extractor = DimensionalExtractor::from_config(&extraction_config()).unwrap();
        let record = test_record(r#"{"region": "west", "amount": 12.5}"#);

        let extracted = extractor.extract(&record).unwrap();

        assert_eq!(
            extracted.key_values(),
            &[Cell::String("west".to_string())]
        );
        assert_eq!(extracted.measure_values(), &[Cell::F64(12.5)]);
    }

    #[test]
    fn extract_reuses_compiled_accessors_across_records() {
        let mut extractor = DimensionalExtractor::from_config(&extraction_config()).unwrap();

        let first = extractor
            .extract(&test_record(r#"{"region": "west", "amount": 1}"#))
            .unwrap();
        let second = extractor
            .extract(&test_record(r#"{"region": "west", "amount": 1}"#))
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn extract_fails_on_compile_error_and_stays_failed() {
        let mut extractor = DimensionalExtractor::from_config(&extraction_config()).unwrap();

        // First record lacks `amount`, so measure compilation fails.
        let record = test_record(r#"{"region": "west"}"#);
        let error = extractor.extract(&record).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingShapeField);

        // A later, complete record does not recover the instance.
        let complete = test_record(r#"{"region": "west", "amount": 1}"#);
        assert!(extractor.extract(&complete).is_err());
    }

    #[test]
    fn extract_propagates_shape_deviation() {
        let mut extractor = DimensionalExtractor::from_config(&extraction_config()).unwrap();
        extractor
            .extract(&test_record(r#"{"region": "west", "amount": 1}"#))
            .unwrap();

        let error = extractor
            .extract(&test_record(r#"{"region": "west"}"#))
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ExtractionFailed);
    }
}
