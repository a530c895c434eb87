//! The editor side of a session.

use std::error::Error;
use std::fmt;

use cscribe_syntax::{Diagnostic, EditOperation, Range};
use thiserror::Error;

/// Identifies an open document, usually by its URI.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wraps a host-specific document identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// How the host handled an edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStatus {
    /// The edit is already part of the document.
    Applied,
    /// The host confirms later through
    /// [`crate::SessionController::edit_settled`].
    Pending,
}

/// Late confirmation of a [`EditStatus::Pending`] edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The host applied the edit.
    Applied,
    /// The host refused or failed to apply the edit.
    Failed,
}

/// One content change reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// Replaced span; `None` when the whole document was replaced.
    pub range: Option<Range>,
    /// Inserted text.
    pub text: String,
}

impl TextChange {
    /// A change replacing the whole document.
    #[must_use]
    pub fn full(text: impl Into<String>) -> Self {
        Self {
            range: None,
            text: text.into(),
        }
    }

    /// A change replacing `range`.
    #[must_use]
    pub fn incremental(range: Range, text: impl Into<String>) -> Self {
        Self {
            range: Some(range),
            text: text.into(),
        }
    }

    /// Line on which a newline was typed, if this change inserted one.
    ///
    /// Whole-document replacements never report a line.
    #[must_use]
    pub fn newline_line(&self) -> Option<usize> {
        self.range
            .filter(|_| self.text.contains('\n'))
            .map(|range| range.start.line_index())
    }
}

/// Errors reported by [`EditorHost`] implementations.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl HostError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the human-readable error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Operations the session controller needs from the editor.
///
/// Implementations read documents fresh on every call; the controller never
/// caches buffer content.
pub trait EditorHost {
    /// Current text of `document`, or `None` when the host does not know it.
    fn document_text(&self, document: &DocumentId) -> Option<String>;

    /// Inserts `edit` into `document` as one atomic change.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the host rejects the edit outright.
    fn apply_edit(
        &mut self,
        document: &DocumentId,
        edit: &EditOperation,
    ) -> Result<EditStatus, HostError>;

    /// Replaces every diagnostic shown for `document`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the diagnostics cannot be delivered.
    fn publish_diagnostics(
        &mut self,
        document: &DocumentId,
        diagnostics: Vec<Diagnostic>,
    ) -> Result<(), HostError>;

    /// Removes every diagnostic shown for `document`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the request cannot be delivered.
    fn clear_diagnostics(&mut self, document: &DocumentId) -> Result<(), HostError>;
}
