//! Mirror of the text of every open document.

use std::collections::HashMap;

use lsp_types::{TextDocumentContentChangeEvent, TextDocumentItem, Uri};

use cscribe_session::DocumentId;
use cscribe_syntax::byte_offset;

use crate::error::ServerError;

#[derive(Debug, Clone)]
struct Document {
    uri: Uri,
    version: i32,
    text: String,
}

/// Open documents keyed by URI.
#[derive(Debug, Default)]
pub(crate) struct DocumentStore {
    documents: HashMap<DocumentId, Document>,
}

impl DocumentStore {
    /// Records an opened document and returns its identifier.
    pub(crate) fn open(&mut self, item: TextDocumentItem) -> DocumentId {
        let id = DocumentId::new(item.uri.as_str());
        self.documents.insert(
            id.clone(),
            Document {
                uri: item.uri,
                version: item.version,
                text: item.text,
            },
        );
        id
    }

    /// Applies content changes in order and records `version`.
    ///
    /// The batch is all or nothing: when any change cannot be applied the
    /// text and version stay as they were.
    pub(crate) fn apply_changes(
        &mut self,
        id: &DocumentId,
        version: i32,
        changes: &[TextDocumentContentChangeEvent],
    ) -> Result<(), ServerError> {
        let document = self
            .documents
            .get_mut(id)
            .ok_or_else(|| ServerError::unknown_document(id.clone()))?;
        let mut text = document.text.clone();
        for change in changes {
            apply_change(&mut text, change)
                .ok_or_else(|| ServerError::invalid_change(id.clone(), change.range))?;
        }
        document.text = text;
        document.version = version;
        Ok(())
    }

    pub(crate) fn close(&mut self, id: &DocumentId) -> bool {
        self.documents.remove(id).is_some()
    }

    pub(crate) fn text(&self, id: &DocumentId) -> Option<&str> {
        self.documents.get(id).map(|document| document.text.as_str())
    }

    pub(crate) fn uri(&self, id: &DocumentId) -> Option<&Uri> {
        self.documents.get(id).map(|document| &document.uri)
    }

    pub(crate) fn version(&self, id: &DocumentId) -> Option<i32> {
        self.documents.get(id).map(|document| document.version)
    }
}

fn apply_change(text: &mut String, change: &TextDocumentContentChangeEvent) -> Option<()> {
    let Some(range) = change.range else {
        text.clone_from(&change.text);
        return Some(());
    };
    let start = offset_of(text, range.start)?;
    let end = offset_of(text, range.end)?;
    if start > end {
        return None;
    }
    text.replace_range(start..end, &change.text);
    Some(())
}

/// Byte offset of an LSP position. Characters past the end of a line clamp
/// to the line end.
fn offset_of(text: &str, position: lsp_types::Position) -> Option<usize> {
    let line_index = usize::try_from(position.line).ok()?;
    let line_start = match line_index.checked_sub(1) {
        None => 0,
        Some(previous) => text.match_indices('\n').nth(previous)?.0 + 1,
    };
    let rest = text.get(line_start..)?;
    let raw_line = rest.split('\n').next().unwrap_or(rest);
    let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
    let column = byte_offset(line, position.character).unwrap_or(line.len());
    line_start.checked_add(column)
}
