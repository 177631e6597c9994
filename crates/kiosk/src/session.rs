//! The state the scan loop keeps between frames.

use crate::error::{ErrorKind, Result};
use crate::resolve::{Resolution, resolve};
use crate::scan::ScannedCode;
use stacks_catalog::BookCache;
use stacks_circulation::{Patron, PatronStore, checkout, return_book};
use stacks_metadata::MetadataProvider;

/// The title the patron most recently scanned, awaiting a decision.
#[derive(Debug, Clone)]
pub struct Selection {
    pub resolution: Resolution,
    /// Best-effort prose summary; absent whenever the provider has none.
    pub description: Option<String>,
}

/// What one decoded frame did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The payload was noise; nothing shown, nothing changed.
    Ignored,
    /// The frame re-read the already-selected title.
    Unchanged,
    /// A different title was resolved and is now selected.
    Selected,
}

/// One logged-in patron's scanning session.
///
/// Owns the book cache and the current patron record; the provider and the
/// patron store are borrowed collaborators. The loop feeds frames to
/// [`Session::scan`] and keypresses to [`Session::checkout_selected`] /
/// [`Session::return_selected`]; a decided keypress always clears the
/// selection, so the next action needs a fresh scan.
pub struct Session<'a> {
    cache: BookCache,
    provider: &'a dyn MetadataProvider,
    store: &'a dyn PatronStore,
    patron: Patron,
    selection: Option<Selection>,
}

impl<'a> Session<'a> {
    pub fn new(cache: BookCache, provider: &'a dyn MetadataProvider, store: &'a dyn PatronStore, patron: Patron) -> Self {
        Self {
            cache,
            provider,
            store,
            patron,
            selection: None,
        }
    }

    /// Feed one decoded frame through resolution.
    ///
    /// Unresolvable codes are dropped silently ([`ScanOutcome::Ignored`]);
    /// the camera sees mostly noise and the patron must never be shown an
    /// error for it. When the selection changes, a description is fetched
    /// best-effort and newly created records are persisted best-effort — a
    /// failed persist only logs and leaves the records pending.
    pub fn scan(&mut self, code: &ScannedCode) -> Result<ScanOutcome> {
        let resolution = match resolve(&mut self.cache, self.provider, code) {
            Ok(resolution) => resolution,
            Err(err) if matches!(&*err, ErrorKind::InvalidCode(_)) => {
                tracing::trace!(payload = %code.payload, "Dropping unresolvable frame");
                return Ok(ScanOutcome::Ignored);
            },
            Err(err) => return Err(err),
        };

        if self.selection.as_ref().is_some_and(|current| current.resolution.book.isbn == resolution.book.isbn) {
            return Ok(ScanOutcome::Unchanged);
        }

        let description = match self.provider.describe(&resolution.book.isbn) {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::debug!(isbn = %resolution.book.isbn, ?err, "No description available");
                None
            },
        };
        if let Err(err) = self.cache.persist() {
            tracing::warn!(?err, "Ledger persist failed; keeping records pending");
        }
        tracing::debug!(display = %resolution.display_name, "Selection changed");
        self.selection = Some(Selection { resolution, description });
        Ok(ScanOutcome::Selected)
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn patron(&self) -> &Patron {
        &self.patron
    }

    /// How many more books this patron may check out (shown on screen).
    pub fn books_remaining(&self) -> u8 {
        self.patron.books_remaining()
    }

    /// Display line for a held ISBN, falling back to the raw ISBN for
    /// titles the catalog has no metadata for.
    pub fn display_name(&self, isbn: &str) -> String {
        self.cache.lookup(isbn).map(|book| book.display_name()).unwrap_or_else(|| isbn.to_string())
    }

    /// Check out the selected title; `None` when nothing is selected (the
    /// keypress is ignored). The selection is cleared whether the decision
    /// succeeds or not.
    pub fn checkout_selected(&mut self) -> Option<stacks_circulation::error::Result<Patron>> {
        let selection = self.selection.take()?;
        let result = checkout(self.store, &self.patron, &selection.resolution.book.isbn);
        if let Ok(updated) = &result {
            self.patron = updated.clone();
        }
        Some(result)
    }

    /// Return the selected title; `None` when nothing is selected. The
    /// selection is cleared whether the decision succeeds or not.
    pub fn return_selected(&mut self) -> Option<stacks_circulation::error::Result<Patron>> {
        let selection = self.selection.take()?;
        let result = return_book(self.store, &self.patron, &selection.resolution.book.isbn);
        if let Ok(updated) = &result {
            self.patron = updated.clone();
        }
        Some(result)
    }

    /// End the session, persisting anything still pending.
    ///
    /// A failure here is surfaced but cannot be rolled back: every record is
    /// already live in memory and was handed to the patron.
    pub fn finish(mut self) -> Result<()> {
        self.cache.persist().map_err(ErrorKind::catalog)?;
        Ok(())
    }
}
