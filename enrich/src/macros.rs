//! Macros for enrichment error handling.
//!
//! Provides convenience macros for creating and returning
//! [`crate::error::EnrichError`] instances with reduced boilerplate.

/// Creates an [`crate::error::EnrichError`] from error kind and description.
///
/// Accepts a static description plus optional dynamic detail and an optional
/// source error.
#[macro_export]
macro_rules! enrich_error {
    ($kind:expr, $desc:expr) => {
        $crate::error::EnrichError::from(($kind, $desc))
    };
    ($kind:expr, $desc:expr, source: $source:expr) => {
        $crate::error::EnrichError::from(($kind, $desc)).with_source($source)
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        $crate::error::EnrichError::from(($kind, $desc, $detail.to_string()))
    };
    ($kind:expr, $desc:expr, $detail:expr, source: $source:expr) => {
        $crate::error::EnrichError::from(($kind, $desc, $detail.to_string())).with_source($source)
    };
}

/// Creates and returns an [`crate::error::EnrichError`] from the current
/// function.
///
/// Combines error creation with early return. Supports the same optional
/// detail and source arguments as [`enrich_error!`].
#[macro_export]
macro_rules! bail {
    ($kind:expr, $desc:expr) => {
        return ::core::result::Result::Err($crate::enrich_error!($kind, $desc))
    };
    ($kind:expr, $desc:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::enrich_error!($kind, $desc, source: $source))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        return ::core::result::Result::Err($crate::enrich_error!($kind, $desc, $detail))
    };
    ($kind:expr, $desc:expr, $detail:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::enrich_error!(
            $kind,
            $desc,
            $detail,
            source: $source
        ))
    };
}
