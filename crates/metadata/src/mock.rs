//! In-memory metadata provider for testing.

use crate::error::{ErrorKind, Result};
use crate::provider::{BookMeta, MetadataProvider};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory metadata provider for testing.
///
/// Metadata is registered up front, keyed by every code expected to resolve
/// to it (the canonical ISBN-13 plus any QR payloads or ISBN-10 forms).
/// Every `fetch` is counted per code, so tests can assert that a cache layer
/// consulted the provider exactly as often as intended.
///
/// # Examples
///
/// ```
/// use stacks_metadata::{BookMeta, MetadataProvider, MockProvider};
///
/// let provider = MockProvider::default()
///     .with_meta(BookMeta::new("9780134190440", "The C++ Programming Language", ["Bjarne Stroustrup"]));
///
/// let meta = provider.fetch("9780134190440").unwrap();
/// assert_eq!(meta.title, "The C++ Programming Language");
/// assert_eq!(provider.fetch_count("9780134190440"), 1);
/// ```
#[derive(Default)]
pub struct MockProvider {
    books: HashMap<String, BookMeta>,
    descriptions: HashMap<String, String>,
    fetches: Mutex<HashMap<String, usize>>,
    unavailable: bool,
}

impl MockProvider {
    /// A provider that fails every `fetch` with `Unavailable`, for testing
    /// transport-fault handling.
    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }

    /// Register metadata under its own canonical ISBN-13.
    pub fn with_meta(mut self, meta: BookMeta) -> Self {
        self.books.insert(meta.isbn13.clone(), meta);
        self
    }

    /// Register metadata under an arbitrary code (QR payload, ISBN-10 form).
    ///
    /// The metadata's own `isbn13` stays authoritative; this only adds a
    /// resolvable key.
    pub fn with_code(mut self, code: impl Into<String>, meta: BookMeta) -> Self {
        self.books.insert(code.into(), meta);
        self
    }

    /// Register a prose summary served by [`MetadataProvider::describe`].
    pub fn with_description(mut self, isbn: impl Into<String>, description: impl Into<String>) -> Self {
        self.descriptions.insert(isbn.into(), description.into());
        self
    }

    /// How many times `fetch` was called with this exact code.
    pub fn fetch_count(&self, code: &str) -> usize {
        // The panic here is DELIBERATE. MockProvider is intended to be used
        // in tests; a poisoned lock means a test already panicked.
        self.fetches.lock().expect("mock lock poisoned").get(code).copied().unwrap_or(0)
    }

    /// How many times `fetch` was called in total, over all codes.
    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().expect("mock lock poisoned").values().sum()
    }
}

impl MetadataProvider for MockProvider {
    fn fetch(&self, code: &str) -> Result<BookMeta> {
        *self.fetches.lock().expect("mock lock poisoned").entry(code.to_string()).or_insert(0) += 1;
        if self.unavailable {
            exn::bail!(ErrorKind::Unavailable("mock provider is offline".to_string()));
        }
        match self.books.get(code) {
            Some(meta) => Ok(meta.clone()),
            None => exn::bail!(ErrorKind::NotFound(code.to_string())),
        }
    }

    fn describe(&self, isbn: &str) -> Result<String> {
        match self.descriptions.get(isbn) {
            Some(description) => Ok(description.clone()),
            None => exn::bail!(ErrorKind::NotFound(isbn.to_string())),
        }
    }
}
