//! Kiosk Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use stacks_catalog::error::Error as CatalogError;
use stacks_metadata::error::Error as MetadataError;

/// A kiosk error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for kiosk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The scanned payload is not a usable ISBN. The scan loop drops the
    /// frame silently; most frames are noise.
    #[display("unresolvable code: {_0}")]
    InvalidCode(#[error(not(source))] String),
    /// The metadata provider could not be reached.
    #[display("metadata provider unavailable")]
    Provider,
    /// The catalog rejected an update; an invariant was breached.
    #[display("catalog error")]
    Catalog,
}

impl ErrorKind {
    /// Convert a provider transport fault, keeping its `Exn` frame as a
    /// child in the new error tree.
    #[track_caller]
    pub fn provider(err: MetadataError) -> Error {
        err.raise(ErrorKind::Provider)
    }

    /// Convert a catalog fault, keeping its `Exn` frame as a child in the
    /// new error tree.
    #[track_caller]
    pub fn catalog(err: CatalogError) -> Error {
        err.raise(ErrorKind::Catalog)
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider)
    }
}
