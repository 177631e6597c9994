//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// `DuplicateKey` and `AliasConflict` are invariant breaches: callers are
/// required to check `lookup`/`lookup_alias` first, so hitting either in
/// production indicates a bug, not a condition to recover from.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The ledger file could not be read or written.
    #[display("ledger error: {}", _0.display())]
    Ledger(#[error(not(source))] PathBuf),
    /// A complete record already exists under this ISBN.
    #[display("duplicate catalog key: {_0}")]
    DuplicateKey(#[error(not(source))] String),
    /// The QR payload already maps to a different canonical ISBN.
    #[display("alias conflict: {payload} already maps to {existing}, refusing {incoming}")]
    AliasConflict {
        payload: String,
        existing: String,
        incoming: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// A failed ledger append keeps its rows pending, so the next persist
    /// cycle retries them naturally.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Ledger(_))
    }
}
