//! Streaming-record enrichment and dimensional field extraction.
//!
//! This crate provides the two building blocks a streaming aggregation
//! pipeline needs between its ingest edge and its rollup store:
//!
//! - a composite-key lookup cache ([`lookup`]) that bulk-loads a reference
//!   file into memory once per connect cycle and serves exact-match lookups
//!   for record enrichment; and
//! - a field-extraction registry ([`extract`]) that compiles configured
//!   field-access expressions into reusable accessors and applies them per
//!   record to produce dimensional key and measure values.
//!
//! The stream runtime that schedules records, the aggregation store that
//! consumes the extracted values, and the storage medium behind the
//! reference file are external collaborators; [`pipeline`] is the surface
//! they call into.

pub mod decode;
pub mod error;
pub mod extract;
pub mod lookup;
mod macros;
pub mod pipeline;
pub mod source;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;
