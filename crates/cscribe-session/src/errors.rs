//! Error types raised while driving a session.

use std::fmt;

use thiserror::Error;

use crate::host::{DocumentId, HostError};

/// Host call being made when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOperation {
    /// Reading the current document text.
    ReadDocument,
    /// Applying an edit.
    ApplyEdit,
    /// Publishing diagnostics.
    PublishDiagnostics,
    /// Clearing diagnostics.
    ClearDiagnostics,
}

impl fmt::Display for HostOperation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ReadDocument => "read document",
            Self::ApplyEdit => "apply edit",
            Self::PublishDiagnostics => "publish diagnostics",
            Self::ClearDiagnostics => "clear diagnostics",
        };
        formatter.write_str(label)
    }
}

/// Failures met while running a pass or handling an event.
///
/// The controller logs these and carries on; they never reach the user.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// The host has no text for a tracked document.
    #[error("host has no text for '{document}'")]
    MissingText {
        /// Document that could not be read.
        document: DocumentId,
    },

    /// A host call failed.
    #[error("host failed to {operation} for '{document}': {source}")]
    Host {
        /// Document the call concerned.
        document: DocumentId,
        /// Operation that failed.
        operation: HostOperation,
        /// Underlying error.
        #[source]
        source: HostError,
    },
}

impl SessionError {
    /// Builds a `MissingText` error.
    pub(crate) const fn missing_text(document: DocumentId) -> Self {
        Self::MissingText { document }
    }

    /// Wraps a host failure.
    pub(crate) const fn host(
        document: DocumentId,
        operation: HostOperation,
        source: HostError,
    ) -> Self {
        Self::Host {
            document,
            operation,
            source,
        }
    }

    /// The host operation that failed.
    #[must_use]
    pub const fn operation(&self) -> HostOperation {
        match self {
            Self::MissingText { .. } => HostOperation::ReadDocument,
            Self::Host { operation, .. } => *operation,
        }
    }
}
