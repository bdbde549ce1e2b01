//! Composite-key lookup cache for record enrichment.
//!
//! [`FileLookupLoader`] performs the one-time bulk load of a reference file
//! into an [`EnrichmentTable`], which then serves exact-match lookups for the
//! remainder of its lifetime.

mod loader;
mod table;

pub use loader::*;
pub use table::*;
