use crate::error::Result;
use crate::patron::{Patron, Slot};

/// The durable patron-record store (the kiosk's user database).
///
/// The core only needs one mutation: atomically set a single slot and read
/// back the full updated record. Failure kinds:
/// [`PatronNotFound`](crate::error::ErrorKind::PatronNotFound) when the
/// record no longer exists, [`Conflict`](crate::error::ErrorKind::Conflict)
/// when the store detects a concurrent modification. Either way no partial
/// mutation is left behind.
pub trait PatronStore {
    fn set_slot(&self, patron_id: &str, slot: Slot, isbn: Option<&str>) -> Result<Patron>;
}
