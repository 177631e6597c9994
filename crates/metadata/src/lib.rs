//! ISBN handling and the metadata provider contract.
//!
//! Scanned codes arrive as raw strings: EAN-13 barcodes carrying an ISBN-13,
//! older ISBN-10 barcodes, or opaque QR payloads that only a provider can
//! resolve. This crate owns:
//!
//! - **Syntactic validation** of ISBN-10/13 with check digits
//!   ([`is_valid_isbn`]), used as the frame-noise gate before any provider
//!   call
//! - **Normalization** ([`normalize`], [`to_isbn13`]) so cache keys are
//!   always the canonical ISBN-13 form
//! - The [`MetadataProvider`] trait: the call contract with whatever service
//!   turns an ISBN into title/authors/publisher/year
//!
//! The `MockProvider` (feature `mock`) records per-code fetch counts so
//! callers can assert their caching behaviour.

pub mod error;
mod isbn;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod provider;

pub use crate::isbn::{is_valid_isbn, normalize, to_isbn13};
#[cfg(any(test, feature = "mock"))]
pub use crate::mock::MockProvider;
pub use crate::provider::{BookMeta, MetadataProvider};
