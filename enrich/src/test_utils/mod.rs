//! Shared helpers for unit and integration tests.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::types::DecodedRecord;

/// Writes the given lines to a fresh temp file and returns its handle.
///
/// The file lives as long as the returned handle; keep it in scope for the
/// duration of the test.
pub fn reference_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp reference file");
    for line in lines {
        writeln!(file, "{line}").expect("failed to write temp reference file");
    }
    file
}

/// Parses a JSON object literal into a [`DecodedRecord`].
///
/// Panics on malformed input; intended for test fixtures only.
pub fn test_record(json: &str) -> DecodedRecord {
    let value: serde_json::Value = serde_json::from_str(json).expect("malformed test record");
    let serde_json::Value::Object(fields) = value else {
        panic!("test record must be a JSON object");
    };
    DecodedRecord::new(fields)
}
