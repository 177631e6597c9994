//! In-memory patron store for testing.

use crate::error::{ErrorKind, Result};
use crate::patron::{Patron, Slot};
use crate::store::PatronStore;
use std::collections::HashMap;
use std::sync::Mutex;

/// Which failure [`MockPatronStore::fail_next`] should inject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFault {
    /// The patron record is gone (`PatronNotFound`).
    Missing,
    /// A concurrent modification was detected (`Conflict`).
    Conflict,
}

/// In-memory patron store for testing.
///
/// Patrons live in a `HashMap` behind a [`Mutex`], so the trait method can
/// operate on `&self`. A single queued [`StoreFault`] lets tests exercise
/// the "operation aborted, no partial mutation" contract.
///
/// # Examples
///
/// ```
/// use stacks_circulation::{MockPatronStore, Patron, PatronStore, Slot};
///
/// let store = MockPatronStore::with_patrons([Patron::new("reader@example.com")]);
/// let updated = store.set_slot("reader@example.com", Slot::First, Some("9780134190440")).unwrap();
/// assert_eq!(updated.slot_1.as_deref(), Some("9780134190440"));
/// ```
#[derive(Default)]
pub struct MockPatronStore {
    patrons: Mutex<HashMap<String, Patron>>,
    fail_next: Mutex<Option<StoreFault>>,
}

impl MockPatronStore {
    /// A store pre-populated with patron records, keyed by their emails.
    pub fn with_patrons(patrons: impl IntoIterator<Item = Patron>) -> Self {
        let store = Self::default();
        {
            // The panic here is DELIBERATE. MockPatronStore is intended to
            // be used in tests; a poisoned lock means a test already panicked.
            let mut guard = store.patrons.lock().expect("mock lock poisoned");
            for patron in patrons {
                guard.insert(patron.email.clone(), patron);
            }
        }
        store
    }

    /// Make the next `set_slot` call fail with the given fault.
    pub fn fail_next(&self, fault: StoreFault) {
        *self.fail_next.lock().expect("mock lock poisoned") = Some(fault);
    }

    /// Read back a patron record as the store currently holds it.
    pub fn patron(&self, email: &str) -> Option<Patron> {
        self.patrons.lock().expect("mock lock poisoned").get(&email.to_lowercase()).cloned()
    }
}

impl PatronStore for MockPatronStore {
    fn set_slot(&self, patron_id: &str, slot: Slot, isbn: Option<&str>) -> Result<Patron> {
        if let Some(fault) = self.fail_next.lock().expect("mock lock poisoned").take() {
            match fault {
                StoreFault::Missing => exn::bail!(ErrorKind::PatronNotFound(patron_id.to_string())),
                StoreFault::Conflict => exn::bail!(ErrorKind::Conflict),
            }
        }
        let mut guard = self.patrons.lock().expect("mock lock poisoned");
        let Some(patron) = guard.get_mut(&patron_id.to_lowercase()) else {
            exn::bail!(ErrorKind::PatronNotFound(patron_id.to_string()));
        };
        match slot {
            Slot::First => patron.slot_1 = isbn.map(String::from),
            Slot::Second => patron.slot_2 = isbn.map(String::from),
        }
        Ok(patron.clone())
    }
}
