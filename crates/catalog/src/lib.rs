//! Book identity cache backed by an append-only CSV ledger.
//!
//! Two encodings can identify the same physical book: a printed ISBN barcode
//! and a QR label whose payload needs a provider round-trip to resolve. This
//! crate deduplicates them behind one [`BookCache`]:
//!
//! - A map of canonical ISBN-13 → [`Book`], warmed from the ledger on
//!   [`BookCache::open`] and appended back on [`BookCache::persist`]
//! - A QR **alias map** payload → canonical ISBN, so re-scanning the same
//!   label never re-queries the provider
//!
//! Records are created exactly once per distinct title and never deleted. A
//! ledger row with blank display fields still indexes its ISBN, so duplicate
//! detection keeps working even when metadata is absent.

mod book;
mod cache;
pub mod error;
mod ledger;

pub use crate::book::Book;
pub use crate::cache::BookCache;
