//! Language server exposing the cscribe C editing helpers.
//!
//! The server speaks LSP over stdio. Open documents are mirrored from the
//! client's incremental changes and fed to a
//! [`cscribe_session::SessionController`], which answers with
//! `workspace/applyEdit` requests for terminators, headers, and prototypes,
//! and with `textDocument/publishDiagnostics` on save.
//!
//! Besides the standard lifecycle and text synchronisation messages the
//! server understands three extensions:
//!
//! - `cscribe/cursorMoved` notification: `{textDocument, line}`; leaving a
//!   line checks it for a missing terminator.
//! - `cscribe/activeDocument` notification: `{textDocument}`; resets cursor
//!   tracking for the newly focused document.
//! - `cscribe/search` request: `{query}`; answers with the reference panel
//!   response.
//!
//! `initializationOptions` may carry `features` and `timing` overrides in
//! the shape of [`cscribe_config::ClientOverrides`].

mod convert;
mod documents;
mod error;
mod event_loop;
mod host;
pub mod jsonrpc;
mod server;
mod telemetry;
pub mod transport;

pub use error::ServerError;
pub use event_loop::run;
pub use telemetry::{TelemetryError, TelemetryHandle, initialise as initialise_telemetry};

/// Log target for protocol traffic.
pub(crate) const LSP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::lsp");

#[cfg(test)]
mod tests;
