//! Error types and result definitions for enrichment and extraction.
//!
//! Provides an error system with classification and captured callsite
//! metadata. The [`EnrichError`] type carries an [`ErrorKind`], a static
//! description, and optional dynamic detail plus source error, which is
//! enough to route failures between the skip-and-continue, abort-load, and
//! propagate-to-caller policies the pipeline distinguishes.

use std::borrow::Cow;
use std::error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Convenient result type for enrichment operations using [`EnrichError`] as
/// the error type.
pub type EnrichResult<T> = Result<T, EnrichError>;

/// Specific categories of errors that can occur during enrichment and
/// extraction.
///
/// Error kinds are organized by failure scope: load-fatal kinds abort a whole
/// cache load, per-line kinds are skippable, compile kinds abort accessor
/// compilation, and per-record kinds propagate to the caller.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // Source errors (fatal for the whole load).
    InvalidSourcePath,
    SourceIoError,

    // Per-line decode errors (skippable by the loader).
    DeserializationError,

    // Accessor compilation errors (fatal for the registry instance).
    MissingShapeField,
    IncompatibleFieldKind,

    // Per-record extraction errors (propagated, policy left to the caller).
    ExtractionFailed,

    // Lifecycle and configuration errors.
    InvalidState,
    ConfigError,

    // Unknown / uncategorized.
    Unknown,
}

/// Detailed payload stored by [`EnrichError`].
#[derive(Debug, Clone)]
struct ErrorPayload {
    kind: ErrorKind,
    description: Cow<'static, str>,
    detail: Option<Cow<'static, str>>,
    source: Option<Arc<dyn error::Error + Send + Sync>>,
    location: &'static Location<'static>,
}

/// Main error type for enrichment operations.
///
/// Carries a classification kind, a static description of what failed, and
/// optional dynamic detail (the offending line, field name, or path) along
/// with the callsite that raised the error.
#[derive(Debug, Clone)]
pub struct EnrichError {
    payload: ErrorPayload,
}

impl EnrichError {
    /// Creates an [`EnrichError`] from its components.
    #[track_caller]
    pub fn new(
        kind: ErrorKind,
        description: impl Into<Cow<'static, str>>,
        detail: Option<Cow<'static, str>>,
    ) -> Self {
        Self {
            payload: ErrorPayload {
                kind,
                description: description.into(),
                detail,
                source: None,
                location: Location::caller(),
            },
        }
    }

    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        self.payload.kind
    }

    /// Returns the detailed error information if available.
    pub fn detail(&self) -> Option<&str> {
        self.payload.detail.as_deref()
    }

    /// Returns the captured callsite location for this error.
    pub fn location(&self) -> &'static Location<'static> {
        self.payload.location
    }

    /// Attaches an originating [`error::Error`] to this error and returns the
    /// modified instance.
    ///
    /// The stored source is preserved across clones and exposed via
    /// [`error::Error::source`].
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        self.payload.source = Some(Arc::new(source));
        self
    }
}

impl PartialEq for EnrichError {
    fn eq(&self, other: &EnrichError) -> bool {
        self.payload.kind == other.payload.kind
    }
}

impl fmt::Display for EnrichError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let location = self.payload.location;
        write!(
            f,
            "[{:?}] {} @ {}:{}:{}",
            self.payload.kind,
            self.payload.description,
            location.file(),
            location.line(),
            location.column()
        )?;

        if let Some(detail) = self.payload.detail.as_deref() {
            write!(f, "\n  Detail: {detail}")?;
        }

        Ok(())
    }
}

impl error::Error for EnrichError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.payload
            .source
            .as_ref()
            .map(|source| source as &(dyn error::Error + 'static))
    }
}

impl From<(ErrorKind, &'static str)> for EnrichError {
    #[track_caller]
    fn from((kind, description): (ErrorKind, &'static str)) -> Self {
        EnrichError::new(kind, description, None)
    }
}

impl From<(ErrorKind, String)> for EnrichError {
    #[track_caller]
    fn from((kind, description): (ErrorKind, String)) -> Self {
        EnrichError::new(kind, description, None)
    }
}

impl From<(ErrorKind, &'static str, String)> for EnrichError {
    #[track_caller]
    fn from((kind, description, detail): (ErrorKind, &'static str, String)) -> Self {
        EnrichError::new(kind, description, Some(Cow::Owned(detail)))
    }
}

impl From<(ErrorKind, &'static str, &'static str)> for EnrichError {
    #[track_caller]
    fn from((kind, description, detail): (ErrorKind, &'static str, &'static str)) -> Self {
        EnrichError::new(kind, description, Some(Cow::Borrowed(detail)))
    }
}

impl From<std::io::Error> for EnrichError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        EnrichError::new(
            ErrorKind::SourceIoError,
            "An I/O error occurred",
            Some(Cow::Owned(error.to_string())),
        )
        .with_source(error)
    }
}

impl From<serde_json::Error> for EnrichError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        EnrichError::new(
            ErrorKind::DeserializationError,
            "A deserialization error occurred",
            Some(Cow::Owned(error.to_string())),
        )
        .with_source(error)
    }
}

impl From<config::shared::ValidationError> for EnrichError {
    #[track_caller]
    fn from(error: config::shared::ValidationError) -> Self {
        EnrichError::new(
            ErrorKind::ConfigError,
            "Configuration validation failed",
            Some(Cow::Owned(error.to_string())),
        )
        .with_source(error)
    }
}
