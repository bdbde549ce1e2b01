use std::collections::HashMap;

use config::shared::EnrichmentSourceConfig;
use tracing::{info, warn};

use crate::decode::JsonLineDecoder;
use crate::error::EnrichResult;
use crate::lookup::EnrichmentTable;
use crate::source::FileLineSource;
use crate::types::{CompositeKey, PayloadRow};

/// Bulk loader for a file-backed enrichment table.
///
/// One load cycle drives source, decoder, and key builder to populate an
/// [`EnrichmentTable`]:
///
/// - a decode failure on a single line is skipped with a diagnostic and does
///   not fail the load;
/// - a stream-level I/O fault aborts the whole load and returns no partial
///   table;
/// - the source handle is released on every exit path.
///
/// The copy-field list, when not configured, is derived from the first
/// successfully decoded record and then kept on the loader. This is a side
/// effect of loading, not idempotent across loads: a later load on the same
/// loader reuses the previously derived fields.
#[derive(Debug)]
pub struct FileLookupLoader {
    source: FileLineSource,
    decoder: JsonLineDecoder,
    lookup_fields: Vec<String>,
    copy_fields: Option<Vec<String>>,
}

impl FileLookupLoader {
    /// Creates a loader from validated configuration.
    pub fn from_config(config: &EnrichmentSourceConfig) -> EnrichResult<Self> {
        config.validate()?;

        Ok(Self::new(
            &config.location,
            config.lookup_fields.clone(),
            config.copy_fields.clone(),
        ))
    }

    /// Creates a loader from its parts.
    pub fn new(
        location: &str,
        lookup_fields: Vec<String>,
        copy_fields: Option<Vec<String>>,
    ) -> Self {
        Self {
            source: FileLineSource::new(location),
            decoder: JsonLineDecoder::new(),
            lookup_fields,
            copy_fields,
        }
    }

    /// Returns the ordered field names composing the lookup key.
    pub fn lookup_fields(&self) -> &[String] {
        &self.lookup_fields
    }

    /// Returns the copy-field list, once configured or derived.
    pub fn copy_fields(&self) -> Option<&[String]> {
        self.copy_fields.as_deref()
    }

    /// Loads the reference data into a fresh table.
    ///
    /// Blocks the caller until the entire source has been consumed or a
    /// fatal fault occurs. Invoked once per connect cycle by the owning
    /// facade.
    pub fn load(&mut self) -> EnrichResult<EnrichmentTable> {
        let stream = self.source.open()?;
        self.load_from_lines(stream)
    }

    fn load_from_lines(
        &mut self,
        lines: impl Iterator<Item = EnrichResult<String>>,
    ) -> EnrichResult<EnrichmentTable> {
        let mut entries = HashMap::new();
        let mut skipped = 0usize;

        for line in lines {
            // Stream-level faults are fatal; decode faults below are not.
            let line = line?;

            let record = match self.decoder.decode(&line) {
                Ok(record) => record,
                Err(error) => {
                    warn!(%error, line = %line, "skipping undecodable reference line");
                    skipped += 1;
                    continue;
                }
            };

            // An explicitly configured empty list counts as unset, so a
            // first record with no fields leaves derivation to a later one.
            if self
                .copy_fields
                .as_ref()
                .is_none_or(|fields| fields.is_empty())
            {
                self.copy_fields = Some(record.field_names().map(str::to_string).collect());
            }

            let payload = match &self.copy_fields {
                Some(copy_fields) => PayloadRow::project(&record, copy_fields),
                None => PayloadRow::new(Vec::new()),
            };
            let key = CompositeKey::build(&record, &self.lookup_fields);

            // Colliding keys keep the later payload, with no duplicate
            // signal.
            entries.insert(key, payload);
        }

        info!(
            entries = entries.len(),
            skipped,
            path = %self.source.path().display(),
            "loaded enrichment table"
        );

        Ok(EnrichmentTable::new(
            entries,
            self.copy_fields.clone().unwrap_or_default(),
        ))
    }
}
