use tracing::debug;

use crate::enrich_error;
use crate::error::{EnrichError, EnrichResult, ErrorKind};
use crate::extract::{AccessorSet, ExpressionMap, RecordShape};

/// Outcome of the registry's one-shot compilation.
#[derive(Debug)]
enum CompileState {
    Pending,
    Compiled(AccessorSet),
    Failed(EnrichError),
}

/// Lazily compiles and caches one [`AccessorSet`] per registry instance.
///
/// The first [`FieldAccessorRegistry::accessors`] call compiles the given
/// expression map against the given shape; every subsequent call returns the
/// cached outcome without recompiling, regardless of whether a different
/// shape is passed. The cache is deliberately keyed by "has this instance
/// compiled yet", not by shape: one operator instance is assumed to see one
/// fixed record shape for its lifetime. An instance whose compilation failed
/// keeps returning that failure rather than retrying.
///
/// Each registry owns its compile state; instances are independent and tests
/// can create fresh ones without cross-test leakage.
#[derive(Debug)]
pub struct FieldAccessorRegistry {
    state: CompileState,
    compile_invocations: usize,
}

impl FieldAccessorRegistry {
    /// Creates a registry with no compiled accessors.
    pub fn new() -> Self {
        Self {
            state: CompileState::Pending,
            compile_invocations: 0,
        }
    }

    /// Returns the accessor set for this registry, compiling it on the first
    /// call.
    ///
    /// Compile failures surface immediately and permanently for this
    /// instance; see [`crate::error::ErrorKind::MissingShapeField`] and
    /// [`crate::error::ErrorKind::IncompatibleFieldKind`].
    pub fn accessors(
        &mut self,
        expressions: &ExpressionMap,
        shape: &RecordShape,
    ) -> EnrichResult<&AccessorSet> {
        if matches!(self.state, CompileState::Pending) {
            self.compile_invocations += 1;
            self.state = match AccessorSet::compile(expressions, shape) {
                Ok(set) => {
                    debug!(accessors = set.len(), "compiled accessor set");
                    CompileState::Compiled(set)
                }
                Err(error) => CompileState::Failed(error),
            };
        }

        match &self.state {
            CompileState::Compiled(set) => Ok(set),
            CompileState::Failed(error) => Err(error.clone()),
            CompileState::Pending => Err(enrich_error!(
                ErrorKind::InvalidState,
                "Accessor compilation did not run"
            )),
        }
    }

    /// Returns how many times compilation actually ran for this instance.
    pub fn compile_invocations(&self) -> usize {
        self.compile_invocations
    }

    /// Returns whether this instance holds a compiled accessor set.
    pub fn is_compiled(&self) -> bool {
        matches!(self.state, CompileState::Compiled(_))
    }
}

impl Default for FieldAccessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
