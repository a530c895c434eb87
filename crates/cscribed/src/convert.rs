//! Conversions between the heuristics' types and `lsp_types`.

use lsp_types::{
    ApplyWorkspaceEditParams, DiagnosticSeverity, DocumentChanges, NumberOrString, OneOf,
    OptionalVersionedTextDocumentIdentifier, TextDocumentContentChangeEvent, TextDocumentEdit,
    TextEdit, Uri, WorkspaceEdit,
};

use cscribe_session::TextChange;
use cscribe_syntax::{Diagnostic, EditOperation, Position, Range, Severity};

/// Source label attached to published diagnostics.
pub(crate) const DIAGNOSTIC_SOURCE: &str = "cscribe";

pub(crate) const fn to_lsp_position(position: Position) -> lsp_types::Position {
    lsp_types::Position {
        line: position.line,
        character: position.column,
    }
}

pub(crate) const fn from_lsp_position(position: lsp_types::Position) -> Position {
    Position {
        line: position.line,
        column: position.character,
    }
}

pub(crate) const fn to_lsp_range(range: Range) -> lsp_types::Range {
    lsp_types::Range {
        start: to_lsp_position(range.start),
        end: to_lsp_position(range.end),
    }
}

pub(crate) const fn from_lsp_range(range: lsp_types::Range) -> Range {
    Range::new(from_lsp_position(range.start), from_lsp_position(range.end))
}

pub(crate) fn to_lsp_diagnostic(diagnostic: &Diagnostic) -> lsp_types::Diagnostic {
    let severity = match diagnostic.severity {
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Information => DiagnosticSeverity::INFORMATION,
    };
    lsp_types::Diagnostic {
        range: to_lsp_range(diagnostic.range),
        severity: Some(severity),
        code: Some(NumberOrString::String(diagnostic.kind.code().to_owned())),
        source: Some(DIAGNOSTIC_SOURCE.to_owned()),
        message: diagnostic.message.clone(),
        ..lsp_types::Diagnostic::default()
    }
}

/// Wraps `edit` in a labelled `workspace/applyEdit` payload pinned to
/// `version`, the document version the edit was computed from.
///
/// A client holding a newer version rejects the edit instead of inserting
/// at shifted positions. LSP has no undo-checkpoint control, so the edit's
/// origin label carries the grouping intent.
pub(crate) fn to_apply_edit_params(
    uri: &Uri,
    version: i32,
    edit: &EditOperation,
) -> ApplyWorkspaceEditParams {
    let at = to_lsp_position(edit.insert_at);
    let insertion = TextEdit::new(lsp_types::Range::new(at, at), edit.text.clone());
    let document_edit = TextDocumentEdit {
        text_document: OptionalVersionedTextDocumentIdentifier {
            uri: uri.clone(),
            version: Some(version),
        },
        edits: vec![OneOf::Left(insertion)],
    };
    ApplyWorkspaceEditParams {
        label: Some(edit.origin.label().to_owned()),
        edit: WorkspaceEdit {
            document_changes: Some(DocumentChanges::Edits(vec![document_edit])),
            ..WorkspaceEdit::default()
        },
    }
}

pub(crate) fn to_text_change(event: &TextDocumentContentChangeEvent) -> TextChange {
    match event.range {
        Some(range) => TextChange::incremental(from_lsp_range(range), event.text.clone()),
        None => TextChange::full(event.text.clone()),
    }
}
