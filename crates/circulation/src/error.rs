//! Circulation Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A circulation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for circulation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Policy violations (`AlreadyHeld`, `SlotsFull`, `NotHeld`) are shown to the
/// patron as-is and change no state. Store faults mean the mutation was
/// aborted; the kiosk reports "something went wrong" and the patron retries.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The patron already holds this title.
    #[display("you have already checked out this book")]
    AlreadyHeld(#[error(not(source))] String),
    /// Both slots are occupied; a book must come back first.
    #[display("you already have two books checked out")]
    SlotsFull,
    /// The patron does not hold this title, so it cannot be returned.
    #[display("this book is not checked out to you")]
    NotHeld(#[error(not(source))] String),
    /// The store no longer knows this patron.
    #[display("patron not found: {_0}")]
    PatronNotFound(#[error(not(source))] String),
    /// The store detected a concurrent modification and refused the write.
    #[display("patron record was modified concurrently")]
    Conflict,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict)
    }

    /// Whether this is a lending-policy violation (user-facing message, no
    /// state change) as opposed to a store fault.
    pub fn is_policy(&self) -> bool {
        matches!(self, Self::AlreadyHeld(_) | Self::SlotsFull | Self::NotHeld(_))
    }
}
