use crate::book::Book;
use crate::error::{ErrorKind, Result};
use crate::ledger::Ledger;
use std::collections::HashMap;
use std::path::PathBuf;

/// The in-memory book index plus the QR alias map.
///
/// Owns the ledger handle: construction loads every durable record,
/// [`BookCache::persist`] appends whatever was created since the last
/// successful persist. Writes take `&mut self`, so exclusivity is structural;
/// the surrounding scan loop is single-threaded by design.
///
/// # Examples
///
/// ```
/// use stacks_catalog::{Book, BookCache};
///
/// let mut cache = BookCache::in_memory();
/// cache.store(Book::bare("9780134190440"))?;
/// cache.store_alias("QR-ABC", "9780134190440")?;
///
/// assert!(cache.lookup("9780134190440").is_some());
/// assert_eq!(cache.lookup_alias("QR-ABC"), Some("9780134190440"));
/// # Ok::<(), stacks_catalog::error::Error>(())
/// ```
pub struct BookCache {
    books: HashMap<String, Book>,
    aliases: HashMap<String, String>,
    /// ISBNs created or completed since the last successful persist.
    pending: Vec<String>,
    ledger: Option<Ledger>,
}

impl BookCache {
    /// Open the ledger at `path` (creating it on first run) and warm the
    /// cache from its rows. Later rows for the same ISBN win, so a record
    /// completed after a bare-ISBN row loads in its completed form.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let (ledger, records) = Ledger::open(path.into())?;
        let mut books = HashMap::new();
        for book in records {
            books.insert(book.isbn.clone(), book);
        }
        tracing::info!(titles = books.len(), "Catalog loaded");
        Ok(Self {
            books,
            aliases: HashMap::new(),
            pending: Vec::new(),
            ledger: Some(ledger),
        })
    }

    /// A cache with no ledger behind it. Nothing survives the process; handy
    /// for tests and for embedding where durability is someone else's job.
    pub fn in_memory() -> Self {
        Self {
            books: HashMap::new(),
            aliases: HashMap::new(),
            pending: Vec::new(),
            ledger: None,
        }
    }

    /// Pure read of the record under a canonical ISBN.
    pub fn lookup(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn)
    }

    /// Pure read of the canonical ISBN a scanned payload maps to.
    pub fn lookup_alias(&self, payload: &str) -> Option<&str> {
        self.aliases.get(payload).map(String::as_str)
    }

    /// Number of distinct titles indexed.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Number of records awaiting a successful [`BookCache::persist`].
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Insert a record under `book.isbn`.
    ///
    /// Fails with `DuplicateKey` when a *complete* record already exists;
    /// callers are expected to `lookup` first. A metadata-absent record is
    /// the one exception: the incoming complete record replaces it, and the
    /// ledger gains a second row that wins on the next load.
    pub fn store(&mut self, book: Book) -> Result<()> {
        if let Some(existing) = self.books.get(&book.isbn) {
            if existing.has_metadata() {
                exn::bail!(ErrorKind::DuplicateKey(book.isbn));
            }
            tracing::debug!(isbn = %book.isbn, "Completing metadata-absent record");
        } else {
            tracing::info!(isbn = %book.isbn, title = book.title.as_deref().unwrap_or(""), "Registered new title");
        }
        if !self.pending.contains(&book.isbn) {
            self.pending.push(book.isbn.clone());
        }
        self.books.insert(book.isbn.clone(), book);
        Ok(())
    }

    /// Map a scanned payload to its canonical ISBN.
    ///
    /// Idempotent for the same pair; fails with `AliasConflict` when the
    /// payload already points at a different ISBN (one physical label cannot
    /// name two titles).
    pub fn store_alias(&mut self, payload: impl Into<String>, isbn: impl Into<String>) -> Result<()> {
        let payload = payload.into();
        let isbn = isbn.into();
        match self.aliases.get(&payload) {
            Some(existing) if *existing == isbn => Ok(()),
            Some(existing) => exn::bail!(ErrorKind::AliasConflict {
                payload,
                existing: existing.clone(),
                incoming: isbn,
            }),
            None => {
                tracing::trace!(%payload, %isbn, "Learned code alias");
                self.aliases.insert(payload, isbn);
                Ok(())
            },
        }
    }

    /// Append every record created since the last successful persist to the
    /// ledger, returning the number of rows written.
    ///
    /// On failure the pending set is retained, so the next cycle re-persists
    /// the same records. Aliases are in-memory only; a QR alias is simply
    /// re-learned on its first scan after a restart.
    pub fn persist(&mut self) -> Result<usize> {
        let Some(ledger) = &self.ledger else {
            self.pending.clear();
            return Ok(0);
        };
        if self.pending.is_empty() {
            return Ok(0);
        }
        let rows = self.pending.iter().filter_map(|isbn| self.books.get(isbn));
        let written = ledger.append(rows)?;
        self.pending.clear();
        tracing::info!(rows = written, path = %ledger.path().display(), "Ledger appended");
        Ok(written)
    }
}
