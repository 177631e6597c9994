//! The append-only CSV ledger behind the cache.
//!
//! One row per resolved title, fixed column order. The file is only ever
//! created (with a header) or appended to; compaction never happens, so a
//! title completed after a bare-ISBN row simply gains a second row and the
//! loader folds last-wins.

use crate::book::Book;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FIELDS: [&str; 7] = ["isbn", "title", "publisher", "year", "author_1", "author_2", "author_3"];

/// One ledger row. Blank optional fields are valid and mean "ISBN known,
/// metadata not yet fully resolved".
#[derive(Debug, Serialize, Deserialize)]
struct BookRow {
    isbn: String,
    title: Option<String>,
    publisher: Option<String>,
    year: Option<String>,
    author_1: Option<String>,
    author_2: Option<String>,
    author_3: Option<String>,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        let mut authors = book.authors.iter().cloned();
        Self {
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            publisher: book.publisher.clone(),
            year: book.year.clone(),
            author_1: authors.next(),
            author_2: authors.next(),
            author_3: authors.next(),
        }
    }
}

impl BookRow {
    /// `None` when the row carries no ISBN at all and cannot be indexed.
    fn into_book(self) -> Option<Book> {
        if self.isbn.is_empty() {
            return None;
        }
        Some(Book {
            isbn: self.isbn,
            title: self.title.filter(|t| !t.is_empty()),
            authors: [self.author_1, self.author_2, self.author_3].into_iter().flatten().filter(|a| !a.is_empty()).collect(),
            publisher: self.publisher.filter(|p| !p.is_empty()),
            year: self.year.filter(|y| !y.is_empty()),
        })
    }
}

/// Handle to the ledger file. Reads happen once at open; every write opens,
/// appends, flushes and closes within the call.
pub(crate) struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Open (or create) the ledger and load every indexable row.
    ///
    /// An absent file is not an error: it is created with a header row. A
    /// row with blank display fields loads as a metadata-absent [`Book`]; a
    /// row that cannot be parsed or carries no ISBN is skipped with a
    /// warning, never a load failure.
    pub(crate) fn open(path: PathBuf) -> Result<(Self, Vec<Book>)> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "Creating ledger file");
            let mut writer = csv::Writer::from_path(&path).or_raise(|| ErrorKind::Ledger(path.clone()))?;
            writer.write_record(FIELDS).or_raise(|| ErrorKind::Ledger(path.clone()))?;
            writer.flush().or_raise(|| ErrorKind::Ledger(path.clone()))?;
            return Ok((Self { path }, Vec::new()));
        }

        tracing::info!(path = %path.display(), "Reading ledger file");
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .or_raise(|| ErrorKind::Ledger(path.clone()))?;
        let mut books = Vec::new();
        for (line, record) in reader.deserialize::<BookRow>().enumerate() {
            let row = match record {
                Ok(row) => row,
                Err(err) => {
                    tracing::warn!(path = %path.display(), line = line + 2, %err, "Skipping unparseable ledger row");
                    continue;
                },
            };
            match row.into_book() {
                Some(book) => {
                    if !book.has_metadata() {
                        tracing::warn!(isbn = %book.isbn, "Ledger row has no title; indexing ISBN without metadata");
                    }
                    books.push(book);
                },
                None => tracing::warn!(path = %path.display(), line = line + 2, "Skipping ledger row without an ISBN"),
            }
        }
        Ok((Self { path }, books))
    }

    /// Append the given records as new rows. The writer is scoped to this
    /// call and explicitly flushed, so a partial append never leaves an open
    /// handle behind.
    pub(crate) fn append<'a>(&self, books: impl IntoIterator<Item = &'a Book>) -> Result<usize> {
        let file = std::fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .or_raise(|| ErrorKind::Ledger(self.path.clone()))?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        let mut written = 0;
        for book in books {
            writer.serialize(BookRow::from(book)).or_raise(|| ErrorKind::Ledger(self.path.clone()))?;
            written += 1;
        }
        writer.flush().or_raise(|| ErrorKind::Ledger(self.path.clone()))?;
        Ok(written)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}
