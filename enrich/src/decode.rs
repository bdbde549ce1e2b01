//! Per-line decoding of reference data into records.

use serde_json::Value;

use crate::bail;
use crate::error::{EnrichResult, ErrorKind};
use crate::types::DecodedRecord;

/// Decodes one line of newline-delimited JSON into a [`DecodedRecord`].
///
/// Each decoder instance is a plain value owned by its loader; there is no
/// shared process-wide decoder state. Decoding is all-or-nothing per line:
/// a malformed line yields an error and no partial record. Whether a failed
/// line aborts anything is the caller's policy, not the decoder's.
#[derive(Debug, Default, Clone)]
pub struct JsonLineDecoder;

impl JsonLineDecoder {
    /// Creates a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Parses one raw line into a record.
    ///
    /// Fails with [`ErrorKind::DeserializationError`] when the line is not a
    /// JSON object.
    pub fn decode(&self, line: &str) -> EnrichResult<DecodedRecord> {
        let value: Value = serde_json::from_str(line)?;

        let Value::Object(fields) = value else {
            bail!(
                ErrorKind::DeserializationError,
                "A reference data line is not a JSON object",
                format!("line `{line}`")
            );
        };

        Ok(DecodedRecord::new(fields))
    }
}

/// Parses an already-owned field mapping, used by tests and collaborators
/// that hold records in JSON form.
pub fn record_from_value(value: Value) -> EnrichResult<DecodedRecord> {
    match value {
        Value::Object(fields) => Ok(DecodedRecord::new(fields)),
        other => bail!(
            ErrorKind::DeserializationError,
            "A record value is not a JSON object",
            format!("value `{other}`")
        ),
    }
}
