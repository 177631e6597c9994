//! Scan resolution and the per-login kiosk session.
//!
//! The camera loop hands this crate decoded frames as [`ScannedCode`]s and
//! keypresses as method calls; everything else is out of scope here. Per
//! frame, [`resolve`] turns a code into a catalogued [`Resolution`],
//! consulting the metadata provider only for codes never seen before. A
//! [`Session`] holds what the loop needs between frames: the current patron,
//! the selected title, and the best-effort persist cycle.
//!
//! Most frames decode to noise. Unresolvable codes surface as
//! [`ScanOutcome::Ignored`], never as a user-visible error.

pub mod error;
mod resolve;
mod scan;
mod session;

pub use crate::resolve::{Resolution, ResolveEffort, resolve};
pub use crate::scan::{ScannedCode, Symbology};
pub use crate::session::{ScanOutcome, Selection, Session};
