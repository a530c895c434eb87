//! Per-document session control for the cscribe heuristics.
//!
//! A [`SessionController`] receives editor events with an explicit `now`,
//! decides which heuristic to run, and sends the resulting edits and
//! diagnostics back through an [`EditorHost`]. Header and prototype passes
//! are debounced per document; each document also owns an [`EditGuard`] so
//! the changes produced by its own edits never trigger further passes.
//!
//! The controller keeps no clock and no threads. Callers wake it at
//! [`SessionController::next_deadline`] and call
//! [`SessionController::poll`].

mod controller;
mod errors;
mod guard;
mod host;
mod session;

pub use controller::{EventDisposition, SessionController};
pub use errors::{HostOperation, SessionError};
pub use guard::EditGuard;
pub use host::{DocumentId, EditOutcome, EditStatus, EditorHost, HostError, TextChange};
pub use session::DocumentSession;

#[cfg(test)]
mod tests;
