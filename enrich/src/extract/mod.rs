//! Dimensional field extraction from records of a fixed runtime shape.
//!
//! Configuration describes field access as logical-name to expression maps;
//! [`FieldAccessorRegistry`] turns one such map into a compiled
//! [`AccessorSet`] exactly once per registry instance, and the set is then
//! applied to every subsequent record.

mod accessor;
mod merge;
mod registry;
mod shape;

use std::collections::BTreeMap;

pub use accessor::*;
pub use merge::*;
pub use registry::*;
pub use shape::*;

/// A mapping from logical name (key or measure name declared by the
/// dimensional schema) to the field-access expression that supplies its
/// value.
///
/// Expressions are dot-separated field paths into the record, descending
/// nested mappings (`"order.id"`). The ordered map gives accessor
/// compilation, and therefore extracted value positions, a deterministic
/// lexicographic order.
pub type ExpressionMap = BTreeMap<String, String>;
