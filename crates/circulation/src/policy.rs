//! The lending-policy decisions and their store mutations.

use crate::error::{ErrorKind, Result};
use crate::patron::Patron;
use crate::store::PatronStore;

/// Whether checking out `isbn` would be legal for this patron.
///
/// `AlreadyHeld` wins over `SlotsFull`: a patron holding the book with both
/// slots occupied is told about the duplicate, not the limit.
pub fn can_checkout(isbn: &str, patron: &Patron) -> Result<()> {
    if patron.holds(isbn) {
        exn::bail!(ErrorKind::AlreadyHeld(isbn.to_string()));
    }
    if patron.first_empty_slot().is_none() {
        exn::bail!(ErrorKind::SlotsFull);
    }
    Ok(())
}

/// Check `isbn` out to the patron, filling their first empty slot.
///
/// Re-validates via [`can_checkout`], then issues exactly one
/// [`PatronStore::set_slot`] call. Store faults are forwarded without retry;
/// the caller re-scans and tries again.
pub fn checkout(store: &dyn PatronStore, patron: &Patron, isbn: &str) -> Result<Patron> {
    can_checkout(isbn, patron)?;
    let Some(slot) = patron.first_empty_slot() else {
        exn::bail!(ErrorKind::SlotsFull);
    };
    let updated = store.set_slot(&patron.email, slot, Some(isbn))?;
    tracing::info!(patron = %updated.email, %isbn, %slot, "Checked out");
    Ok(updated)
}

/// Return `isbn`, clearing whichever slot holds it.
///
/// Fails with `NotHeld` when the patron does not have the book; store faults
/// are forwarded without retry.
pub fn return_book(store: &dyn PatronStore, patron: &Patron, isbn: &str) -> Result<Patron> {
    let Some(slot) = patron.slot_holding(isbn) else {
        exn::bail!(ErrorKind::NotHeld(isbn.to_string()));
    };
    let updated = store.set_slot(&patron.email, slot, None)?;
    tracing::info!(patron = %updated.email, %isbn, %slot, "Returned");
    Ok(updated)
}
