//! The call contract with the external metadata service.

use crate::error::{ErrorKind, Result};

/// A provider's answer for one resolved code.
///
/// `isbn13` is authoritative: whatever form the code was scanned in, this is
/// the canonical key the catalog files the title under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMeta {
    /// Canonical ISBN-13 for the title.
    pub isbn13: String,
    /// Work title.
    pub title: String,
    /// Ordered list of authors, primary first.
    pub authors: Vec<String>,
    /// Publisher, when the provider knows it.
    pub publisher: Option<String>,
    /// Publication year, kept as a string (providers disagree on formats).
    pub year: Option<String>,
}

impl BookMeta {
    pub fn new(isbn13: impl Into<String>, title: impl Into<String>, authors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            isbn13: isbn13.into(),
            title: title.into(),
            authors: authors.into_iter().map(Into::into).collect(),
            publisher: None,
            year: None,
        }
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }
}

/// Resolves scanned codes to book metadata.
///
/// Implementations wrap whatever external service answers ISBN queries; the
/// kiosk core only ever talks through this trait.
pub trait MetadataProvider {
    /// Resolve a scanned code to full metadata.
    ///
    /// Fails with [`ErrorKind::NotFound`] when the code is not a resolvable
    /// ISBN (callers treat the scan as frame noise) and
    /// [`ErrorKind::Unavailable`] when the service cannot be reached.
    fn fetch(&self, code: &str) -> Result<BookMeta>;

    /// Fetch a prose summary for an already-resolved ISBN.
    ///
    /// Best-effort enrichment: callers display the summary when available
    /// and carry on without one otherwise. The default implementation knows
    /// no descriptions.
    fn describe(&self, isbn: &str) -> Result<String> {
        exn::bail!(ErrorKind::NotFound(isbn.to_string()))
    }
}
