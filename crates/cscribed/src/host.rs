//! [`EditorHost`] backed by an LSP client.

use std::collections::HashMap;
use std::io::Write;

use lsp_types::{PublishDiagnosticsParams, Uri};
use serde::Serialize;
use tracing::debug;

use cscribe_session::{DocumentId, EditStatus, EditorHost, HostError};
use cscribe_syntax::{Diagnostic, EditOperation};

use crate::LSP_TARGET;
use crate::convert::{to_apply_edit_params, to_lsp_diagnostic};
use crate::documents::DocumentStore;
use crate::error::ServerError;
use crate::jsonrpc::{JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, RequestId};
use crate::transport::MessageWriter;

const APPLY_EDIT: &str = "workspace/applyEdit";
const PUBLISH_DIAGNOSTICS: &str = "textDocument/publishDiagnostics";

/// Sends edits and diagnostics to the client and mirrors its documents.
///
/// Edits go out as `workspace/applyEdit` requests and are reported as
/// [`EditStatus::Pending`]; the client's response settles them.
#[derive(Debug)]
pub(crate) struct LspHost<W> {
    writer: MessageWriter<W>,
    pub(crate) documents: DocumentStore,
    pending: HashMap<RequestId, DocumentId>,
    next_request: i64,
}

impl<W: Write> LspHost<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self {
            writer: MessageWriter::new(writer),
            documents: DocumentStore::default(),
            pending: HashMap::new(),
            next_request: 1,
        }
    }

    #[cfg(test)]
    pub(crate) const fn output(&self) -> &W {
        self.writer.get_ref()
    }

    pub(crate) fn respond(&mut self, response: &JsonRpcResponse) -> Result<(), ServerError> {
        self.send(response)
    }

    /// Removes and returns the document an applyEdit request was sent for.
    pub(crate) fn take_pending(&mut self, id: &RequestId) -> Option<DocumentId> {
        self.pending.remove(id)
    }

    fn send(&mut self, message: &impl Serialize) -> Result<(), ServerError> {
        let payload = serde_json::to_vec(message)?;
        self.writer.send(&payload)?;
        Ok(())
    }

    fn notify(&mut self, method: &str, params: impl Serialize) -> Result<(), ServerError> {
        let params_value = serde_json::to_value(params)?;
        self.send(&JsonRpcNotification::new(method, params_value))
    }

    fn request(&mut self, method: &str, params: impl Serialize) -> Result<RequestId, ServerError> {
        let id = RequestId::Number(self.next_request);
        self.next_request = self.next_request.wrapping_add(1);
        let params_value = serde_json::to_value(params)?;
        self.send(&JsonRpcRequest::new(id.clone(), method, params_value))?;
        debug!(target: LSP_TARGET, method, %id, "sent request");
        Ok(id)
    }

    fn uri(&self, document: &DocumentId) -> Result<Uri, HostError> {
        self.documents
            .uri(document)
            .cloned()
            .ok_or_else(|| HostError::new(format!("document is not open: {document}")))
    }

    fn send_diagnostics(
        &mut self,
        document: &DocumentId,
        diagnostics: Vec<lsp_types::Diagnostic>,
    ) -> Result<(), HostError> {
        let uri = self.uri(document)?;
        let version = self.documents.version(document);
        let params = PublishDiagnosticsParams::new(uri, diagnostics, version);
        self.notify(PUBLISH_DIAGNOSTICS, params)
            .map_err(|error| HostError::with_source("failed to publish diagnostics", error))
    }
}

impl<W: Write> EditorHost for LspHost<W> {
    fn document_text(&self, document: &DocumentId) -> Option<String> {
        self.documents.text(document).map(str::to_owned)
    }

    fn apply_edit(
        &mut self,
        document: &DocumentId,
        edit: &EditOperation,
    ) -> Result<EditStatus, HostError> {
        let uri = self.uri(document)?;
        let version = self
            .documents
            .version(document)
            .ok_or_else(|| HostError::new(format!("document is not open: {document}")))?;
        let id = self
            .request(APPLY_EDIT, to_apply_edit_params(&uri, version, edit))
            .map_err(|error| HostError::with_source("failed to send edit", error))?;
        self.pending.insert(id, document.clone());
        Ok(EditStatus::Pending)
    }

    fn publish_diagnostics(
        &mut self,
        document: &DocumentId,
        diagnostics: Vec<Diagnostic>,
    ) -> Result<(), HostError> {
        let converted = diagnostics.iter().map(to_lsp_diagnostic).collect();
        self.send_diagnostics(document, converted)
    }

    fn clear_diagnostics(&mut self, document: &DocumentId) -> Result<(), HostError> {
        self.send_diagnostics(document, Vec::new())
    }
}
