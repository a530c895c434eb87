//! Recording editor host used in tests.

use std::collections::HashMap;

use cscribe_syntax::{Diagnostic, EditOperation};

use crate::host::{DocumentId, EditStatus, EditorHost, HostError};

/// How the host answers edit requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Apply the edit and report [`EditStatus::Applied`].
    #[default]
    Immediate,
    /// Apply the edit and report [`EditStatus::Pending`].
    Deferred,
    /// Reject the edit.
    Reject,
}

/// Test double holding document text and recording every host call.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub(crate) documents: HashMap<DocumentId, String>,
    pub edit_mode: EditMode,
    pub fail_publish: bool,
    pub edits: Vec<(DocumentId, EditOperation)>,
    pub published: Vec<(DocumentId, Vec<Diagnostic>)>,
    pub cleared: Vec<DocumentId>,
}

impl RecordingHost {
    pub fn set_text(&mut self, document: &DocumentId, text: impl Into<String>) {
        self.documents.insert(document.clone(), text.into());
    }

    pub fn text(&self, document: &DocumentId) -> String {
        self.documents.get(document).cloned().unwrap_or_default()
    }

    pub fn last_published(&self) -> Option<&[Diagnostic]> {
        self.published
            .last()
            .map(|(_, diagnostics)| diagnostics.as_slice())
    }
}

impl EditorHost for RecordingHost {
    fn document_text(&self, document: &DocumentId) -> Option<String> {
        self.documents.get(document).cloned()
    }

    fn apply_edit(
        &mut self,
        document: &DocumentId,
        edit: &EditOperation,
    ) -> Result<EditStatus, HostError> {
        self.edits.push((document.clone(), edit.clone()));
        if self.edit_mode == EditMode::Reject {
            return Err(HostError::new("edit rejected by test host"));
        }
        let Some(text) = self.documents.get_mut(document) else {
            return Err(HostError::new(format!("unknown document {document}")));
        };
        let Some(updated) = edit.apply(text) else {
            return Err(HostError::new("edit position outside the document"));
        };
        *text = updated;
        Ok(match self.edit_mode {
            EditMode::Deferred => EditStatus::Pending,
            EditMode::Immediate | EditMode::Reject => EditStatus::Applied,
        })
    }

    fn publish_diagnostics(
        &mut self,
        document: &DocumentId,
        diagnostics: Vec<Diagnostic>,
    ) -> Result<(), HostError> {
        if self.fail_publish {
            return Err(HostError::new("diagnostics channel closed"));
        }
        self.published.push((document.clone(), diagnostics));
        Ok(())
    }

    fn clear_diagnostics(&mut self, document: &DocumentId) -> Result<(), HostError> {
        self.cleared.push(document.clone());
        Ok(())
    }
}
