//! Error types for the language server.

use std::io;

use thiserror::Error;

use cscribe_session::DocumentId;

use crate::transport::TransportError;

/// Errors raised while serving a client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServerError {
    /// Framing or I/O failure on stdio.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// JSON serialisation or deserialisation failed.
    #[error("JSON codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The stdin reader thread could not be started.
    #[error("failed to start the message reader: {source}")]
    ReaderSpawn {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A notification named a document that is not open.
    #[error("document is not open: {document}")]
    UnknownDocument {
        /// The document named by the client.
        document: DocumentId,
    },

    /// A content change did not fit the mirrored text.
    #[error("change to {document} does not fit its text (range {range:?})")]
    InvalidChange {
        /// The document being changed.
        document: DocumentId,
        /// Range named by the change.
        range: Option<lsp_types::Range>,
    },

    /// The client exited or closed stdin without requesting shutdown.
    #[error("client exited without requesting shutdown")]
    ExitWithoutShutdown,
}

impl ServerError {
    pub(crate) const fn reader_spawn(source: io::Error) -> Self {
        Self::ReaderSpawn { source }
    }

    pub(crate) const fn unknown_document(document: DocumentId) -> Self {
        Self::UnknownDocument { document }
    }

    pub(crate) const fn invalid_change(
        document: DocumentId,
        range: Option<lsp_types::Range>,
    ) -> Self {
        Self::InvalidChange { document, range }
    }
}
