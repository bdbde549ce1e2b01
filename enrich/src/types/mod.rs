//! Common types used throughout the enrichment system.
//!
//! Re-exports the loosely-typed cell value, decoded record, composite key,
//! and payload row types shared by the lookup and extraction sides.

mod cell;
mod key;
mod record;
mod row;

pub use cell::*;
pub use key::*;
pub use record::*;
pub use row::*;
