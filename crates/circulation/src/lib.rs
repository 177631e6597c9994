//! The lending policy: two books per patron, no double checkout.
//!
//! Patron state lives in an external store (the kiosk's user database); this
//! crate is the pure decision layer in front of it. [`can_checkout`] answers
//! legality, [`checkout`]/[`return_book`] turn a legal decision into exactly
//! one [`PatronStore::set_slot`] mutation and hand back the updated record.
//!
//! A [`Patron`] has two named slots rather than a positional list, so the
//! two-book invariant holds by construction. Slots only ever contain
//! canonical ISBNs; resolving scanned codes is the catalog's job.

pub mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod patron;
mod policy;
mod store;

#[cfg(any(test, feature = "mock"))]
pub use crate::mock::{MockPatronStore, StoreFault};
pub use crate::patron::{Patron, Slot};
pub use crate::policy::{can_checkout, checkout, return_book};
pub use crate::store::PatronStore;
