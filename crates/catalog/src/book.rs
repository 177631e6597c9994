use stacks_metadata::BookMeta;

/// A catalogued physical title, keyed by canonical ISBN-13.
///
/// `title == None` means "ISBN known, metadata not yet resolved": the record
/// still participates in duplicate detection but has nothing to display. The
/// ledger stores at most three authors, so conversion from provider metadata
/// truncates the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Canonical ISBN-13 (the cache key).
    pub isbn: String,
    /// Work title; `None` when metadata is absent.
    pub title: Option<String>,
    /// Up to [`Book::MAX_AUTHORS`] authors, primary first.
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub year: Option<String>,
}

impl Book {
    /// The ledger has columns for three authors; anything past that is dropped.
    pub const MAX_AUTHORS: usize = 3;

    /// A record with a known ISBN but no resolved metadata.
    pub fn bare(isbn: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            title: None,
            authors: Vec::new(),
            publisher: None,
            year: None,
        }
    }

    /// Whether display metadata has been resolved for this record.
    pub fn has_metadata(&self) -> bool {
        self.title.is_some()
    }

    /// The line shown next to a recognised scan:
    /// `"<title> - <author_1>[, <author_2>][, <author_3>]"`, falling back to
    /// the raw ISBN when metadata is absent.
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) if self.authors.is_empty() => title.clone(),
            Some(title) => format!("{} - {}", title, self.authors.join(", ")),
            None => self.isbn.clone(),
        }
    }
}

impl From<BookMeta> for Book {
    fn from(meta: BookMeta) -> Self {
        let mut authors = meta.authors;
        authors.retain(|author| !author.is_empty());
        authors.truncate(Self::MAX_AUTHORS);
        Self {
            isbn: meta.isbn13,
            title: Some(meta.title),
            authors,
            publisher: meta.publisher.filter(|p| !p.is_empty()),
            year: meta.year.filter(|y| !y.is_empty()),
        }
    }
}
