//! Line-oriented access to reference data sources.
//!
//! The storage medium behind reference data is abstracted down to "a lazy
//! sequence of raw text lines". Only the local file system is implemented
//! here; the loader consumes any `Iterator<Item = EnrichResult<String>>`.

mod file;

pub use file::*;
