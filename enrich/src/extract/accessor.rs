use serde_json::Value;

use crate::bail;
use crate::error::{EnrichResult, ErrorKind};
use crate::extract::{ExpressionMap, FieldKind, RecordShape};
use crate::types::{Cell, DecodedRecord};

/// A compiled accessor extracting one logical value from records of a known
/// shape.
///
/// Compilation validates the expression's full path against the shape;
/// reading applies the path to a record and is pure with respect to it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccessor {
    name: String,
    path: Vec<String>,
}

impl FieldAccessor {
    /// Compiles one logical-name/expression pair against a record shape.
    ///
    /// Fails with [`ErrorKind::MissingShapeField`] when any path segment is
    /// absent from the shape, and with [`ErrorKind::IncompatibleFieldKind`]
    /// when the path descends through a field that is not a nested mapping.
    pub fn compile(name: &str, expression: &str, shape: &RecordShape) -> EnrichResult<Self> {
        let path: Vec<String> = expression.split('.').map(str::to_string).collect();
        if path.iter().any(String::is_empty) {
            bail!(
                ErrorKind::MissingShapeField,
                "A field-access expression is malformed",
                format!("expression `{expression}` for `{name}` has an empty path segment")
            );
        }

        let mut current = shape;
        for (position, segment) in path.iter().enumerate() {
            let Some(kind) = current.field(segment) else {
                bail!(
                    ErrorKind::MissingShapeField,
                    "A field-access expression references a field absent from the record shape",
                    format!("expression `{expression}` for `{name}`: no field `{segment}`")
                );
            };

            let terminal = position == path.len() - 1;
            if terminal {
                break;
            }

            match kind {
                FieldKind::Map(nested) => current = nested,
                other => bail!(
                    ErrorKind::IncompatibleFieldKind,
                    "A field-access expression descends through a non-mapping field",
                    format!(
                        "expression `{expression}` for `{name}`: `{segment}` is {}",
                        other.name()
                    )
                ),
            }
        }

        Ok(Self {
            name: name.to_string(),
            path,
        })
    }

    /// Returns the logical name this accessor supplies.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads this accessor's value from a record.
    ///
    /// Fails with [`ErrorKind::ExtractionFailed`] when the record no longer
    /// matches the compiled shape: a path segment is absent, or an
    /// intermediate segment is not a nested mapping. A present-but-null leaf
    /// reads as [`Cell::Null`].
    pub fn read(&self, record: &DecodedRecord) -> EnrichResult<Cell> {
        let mut segments = self.path.iter();
        // Compilation guarantees at least one segment.
        let Some(first) = segments.next() else {
            bail!(
                ErrorKind::ExtractionFailed,
                "An accessor has an empty path"
            );
        };

        let mut current = match record.get(first) {
            Some(value) => value,
            None => {
                bail!(
                    ErrorKind::ExtractionFailed,
                    "A record does not match the compiled shape",
                    format!("field `{first}` for `{}` is absent", self.name)
                );
            }
        };

        for segment in segments {
            let Value::Object(fields) = current else {
                bail!(
                    ErrorKind::ExtractionFailed,
                    "A record does not match the compiled shape",
                    format!("path to `{segment}` for `{}` is not a mapping", self.name)
                );
            };
            current = match fields.get(segment) {
                Some(value) => value,
                None => {
                    bail!(
                        ErrorKind::ExtractionFailed,
                        "A record does not match the compiled shape",
                        format!("field `{segment}` for `{}` is absent", self.name)
                    );
                }
            };
        }

        Ok(Cell::from_json(current))
    }
}

/// An ordered list of compiled accessors derived from one expression map
/// against one record shape.
///
/// Order is the expression map's iteration order (lexicographic by logical
/// name), so extracted values align positionally with
/// [`AccessorSet::names`].
#[derive(Debug, Clone, PartialEq)]
pub struct AccessorSet {
    accessors: Vec<FieldAccessor>,
}

impl AccessorSet {
    /// Compiles every entry of an expression map against a record shape.
    ///
    /// Fails on the first entry that does not compile; no fallback
    /// expression is substituted.
    pub fn compile(expressions: &ExpressionMap, shape: &RecordShape) -> EnrichResult<Self> {
        let accessors = expressions
            .iter()
            .map(|(name, expression)| FieldAccessor::compile(name, expression, shape))
            .collect::<EnrichResult<Vec<_>>>()?;

        Ok(Self { accessors })
    }

    /// Returns the logical names in accessor order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.accessors.iter().map(FieldAccessor::name)
    }

    /// Applies every accessor to a record, collecting values positionally.
    ///
    /// An individual accessor failure propagates; drop-or-halt policy for
    /// the record belongs to the caller.
    pub fn read_all(&self, record: &DecodedRecord) -> EnrichResult<Vec<Cell>> {
        self.accessors
            .iter()
            .map(|accessor| accessor.read(record))
            .collect()
    }

    /// Returns the number of accessors in the set.
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    /// Returns whether the set has no accessors.
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}
