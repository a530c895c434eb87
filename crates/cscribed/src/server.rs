//! LSP message dispatch on top of the session controller.

use std::io::Write;
use std::time::Instant;

use lsp_types::{
    ApplyWorkspaceEditResponse, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, DidSaveTextDocumentParams, InitializeResult, ServerCapabilities,
    ServerInfo, TextDocumentIdentifier, TextDocumentSyncCapability, TextDocumentSyncKind,
    TextDocumentSyncOptions, TextDocumentSyncSaveOptions,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use cscribe_catalog::PanelRequest;
use cscribe_config::{ClientOverrides, Config};
use cscribe_session::{DocumentId, EditOutcome, EventDisposition, SessionController, TextChange};

use crate::LSP_TARGET;
use crate::convert::to_text_change;
use crate::error::ServerError;
use crate::host::LspHost;
use crate::jsonrpc::{
    INTERNAL_ERROR, INVALID_REQUEST, Incoming, JsonRpcError, JsonRpcResponse, PARSE_ERROR,
    RequestId, SERVER_NOT_INITIALIZED,
};

/// Whether the event loop keeps going after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    Continue,
    Exit,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct InitializeOptions {
    initialization_options: Option<ClientOverrides>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CursorMovedParams {
    text_document: TextDocumentIdentifier,
    line: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveDocumentParams {
    text_document: TextDocumentIdentifier,
}

/// One client connection: the document mirror, the controller, and the
/// lifecycle flags.
#[derive(Debug)]
pub(crate) struct Server<W> {
    config: Config,
    host: LspHost<W>,
    controller: Option<SessionController>,
    shutdown_requested: bool,
}

impl<W: Write> Server<W> {
    pub(crate) fn new(config: Config, writer: W) -> Self {
        Self {
            config,
            host: LspHost::new(writer),
            controller: None,
            shutdown_requested: false,
        }
    }

    #[cfg(test)]
    pub(crate) const fn output(&self) -> &W {
        self.host.output()
    }

    #[cfg(test)]
    pub(crate) const fn controller(&self) -> Option<&SessionController> {
        self.controller.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn host_text(&self, document: &DocumentId) -> Option<String> {
        self.host.documents.text(document).map(str::to_owned)
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.controller
            .as_ref()
            .and_then(SessionController::next_deadline)
    }

    /// Runs the passes that are due at `now`.
    pub(crate) fn poll(&mut self, now: Instant) {
        if let Some(controller) = self.controller.as_mut() {
            controller.poll(&mut self.host, now);
        }
    }

    /// Result of the connection once the client has gone.
    pub(crate) const fn finish(&self) -> Result<(), ServerError> {
        if self.shutdown_requested {
            Ok(())
        } else {
            Err(ServerError::ExitWithoutShutdown)
        }
    }

    /// Decodes and handles one payload.
    ///
    /// Payloads that are not JSON-RPC messages are answered with an error
    /// response and otherwise ignored.
    pub(crate) fn handle_payload(
        &mut self,
        payload: &[u8],
        now: Instant,
    ) -> Result<Control, ServerError> {
        match Incoming::parse(payload) {
            Ok(Some(message)) => self.handle(message, now),
            Ok(None) => {
                let error = JsonRpcError::new(INVALID_REQUEST, "not a request or notification");
                self.host.respond(&JsonRpcResponse::failure(None, error))?;
                Ok(Control::Continue)
            }
            Err(error) => {
                warn!(target: LSP_TARGET, %error, "discarding malformed message");
                let parse_error = JsonRpcError::new(PARSE_ERROR, error.to_string());
                self.host.respond(&JsonRpcResponse::failure(None, parse_error))?;
                Ok(Control::Continue)
            }
        }
    }

    /// Handles one decoded message.
    pub(crate) fn handle(
        &mut self,
        message: Incoming,
        now: Instant,
    ) -> Result<Control, ServerError> {
        match message {
            Incoming::Request { id, method, params } => {
                let response = match self.handle_request(&method, params) {
                    Ok(result) => JsonRpcResponse::success(id, result),
                    Err(error) => {
                        debug!(target: LSP_TARGET, %method, code = error.code, "request failed");
                        JsonRpcResponse::failure(Some(id), error)
                    }
                };
                self.host.respond(&response)?;
                Ok(Control::Continue)
            }
            Incoming::Notification { method, params } => {
                Ok(self.handle_notification(&method, params, now))
            }
            Incoming::Response { id, result, error } => {
                self.settle_edit(&id, result, error.as_ref(), now);
                Ok(Control::Continue)
            }
        }
    }

    fn handle_request(&mut self, method: &str, params: Value) -> Result<Value, JsonRpcError> {
        if method == "initialize" {
            return self.initialize(params);
        }
        if self.controller.is_none() {
            return Err(JsonRpcError::new(
                SERVER_NOT_INITIALIZED,
                "server not initialized",
            ));
        }
        if self.shutdown_requested {
            return Err(JsonRpcError::new(INVALID_REQUEST, "server is shutting down"));
        }
        match method {
            "shutdown" => {
                info!(target: LSP_TARGET, "shutdown requested");
                self.shutdown_requested = true;
                Ok(Value::Null)
            }
            "cscribe/search" => {
                let SearchParams { query } = parse_params(params)?;
                let response = PanelRequest::Search { query }.respond();
                serde_json::to_value(response)
                    .map_err(|error| JsonRpcError::new(INTERNAL_ERROR, error.to_string()))
            }
            _ => Err(JsonRpcError::method_not_found(method)),
        }
    }

    fn initialize(&mut self, params: Value) -> Result<Value, JsonRpcError> {
        if self.controller.is_some() {
            return Err(JsonRpcError::new(INVALID_REQUEST, "server already initialized"));
        }
        let options: InitializeOptions = if params.is_null() {
            InitializeOptions::default()
        } else {
            parse_params(params)?
        };
        let mut config = self.config.clone();
        if let Some(overrides) = options.initialization_options {
            config.apply_client_overrides(overrides);
        }
        info!(
            target: LSP_TARGET,
            features = ?config.features,
            timing = ?config.timing,
            "initializing"
        );
        self.controller = Some(SessionController::new(config));
        serde_json::to_value(initialize_result())
            .map_err(|error| JsonRpcError::new(INTERNAL_ERROR, error.to_string()))
    }

    fn handle_notification(&mut self, method: &str, params: Value, now: Instant) -> Control {
        if method == "exit" {
            return Control::Exit;
        }
        let outcome = match method {
            "initialized" => Ok(()),
            "textDocument/didOpen" => parse_params(params).map(|open| self.did_open(open, now)),
            "textDocument/didChange" => {
                parse_params(params).map(|change| self.did_change(&change, now))
            }
            "textDocument/didSave" => parse_params(params).map(|save| self.did_save(&save, now)),
            "textDocument/didClose" => parse_params(params).map(|close| self.did_close(&close)),
            "cscribe/cursorMoved" => {
                parse_params(params).map(|moved| self.cursor_moved(&moved, now))
            }
            "cscribe/activeDocument" => {
                parse_params(params).map(|active| self.active_document(&active))
            }
            _ => {
                debug!(target: LSP_TARGET, method, "ignoring notification");
                Ok(())
            }
        };
        if let Err(error) = outcome {
            warn!(target: LSP_TARGET, method, error = %error.message, "malformed notification");
        }
        Control::Continue
    }

    fn did_open(&mut self, params: DidOpenTextDocumentParams, now: Instant) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let language_id = params.text_document.language_id.clone();
        let document = self.host.documents.open(params.text_document);
        controller.did_open(document, &language_id, now);
    }

    fn did_change(&mut self, params: &DidChangeTextDocumentParams, now: Instant) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let document = document_id(&params.text_document.uri);
        if let Err(error) = self.host.documents.apply_changes(
            &document,
            params.text_document.version,
            &params.content_changes,
        ) {
            warn!(target: LSP_TARGET, uri = %document, %error, "change not mirrored");
            return;
        }
        let changes: Vec<TextChange> = params.content_changes.iter().map(to_text_change).collect();
        let disposition = controller.did_change(&mut self.host, &document, &changes, now);
        trace_disposition(&document, "change", disposition);
    }

    fn did_save(&mut self, params: &DidSaveTextDocumentParams, now: Instant) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let document = document_id(&params.text_document.uri);
        let disposition = controller.did_save(&mut self.host, &document, now);
        trace_disposition(&document, "save", disposition);
    }

    fn did_close(&mut self, params: &DidCloseTextDocumentParams) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let document = document_id(&params.text_document.uri);
        controller.did_close(&mut self.host, &document);
        self.host.documents.close(&document);
    }

    fn cursor_moved(&mut self, params: &CursorMovedParams, now: Instant) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let document = document_id(&params.text_document.uri);
        let disposition = controller.cursor_moved(&mut self.host, &document, params.line, now);
        trace_disposition(&document, "cursor", disposition);
    }

    fn active_document(&mut self, params: &ActiveDocumentParams) {
        if let Some(controller) = self.controller.as_mut() {
            let document = document_id(&params.text_document.uri);
            controller.focus_changed(&document);
        }
    }

    fn settle_edit(
        &mut self,
        id: &RequestId,
        result: Option<Value>,
        error: Option<&JsonRpcError>,
        now: Instant,
    ) {
        let Some(document) = self.host.take_pending(id) else {
            debug!(target: LSP_TARGET, %id, "response to unknown request");
            return;
        };
        let applied = error.is_none()
            && result
                .and_then(|value| serde_json::from_value::<ApplyWorkspaceEditResponse>(value).ok())
                .is_some_and(|response| response.applied);
        let outcome = if applied {
            EditOutcome::Applied
        } else {
            EditOutcome::Failed
        };
        debug!(target: LSP_TARGET, uri = %document, %id, ?outcome, "edit settled");
        if let Some(controller) = self.controller.as_mut() {
            controller.edit_settled(&document, outcome, now);
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params).map_err(JsonRpcError::invalid_params)
}

fn document_id(uri: &lsp_types::Uri) -> DocumentId {
    DocumentId::new(uri.as_str())
}

fn trace_disposition(document: &DocumentId, event: &str, disposition: EventDisposition) {
    if disposition != EventDisposition::Handled {
        debug!(target: LSP_TARGET, uri = %document, event, ?disposition, "event not handled");
    }
}

fn initialize_result() -> InitializeResult {
    let sync = TextDocumentSyncOptions {
        open_close: Some(true),
        change: Some(TextDocumentSyncKind::INCREMENTAL),
        save: Some(TextDocumentSyncSaveOptions::Supported(true)),
        ..TextDocumentSyncOptions::default()
    };
    InitializeResult {
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(sync)),
            ..ServerCapabilities::default()
        },
        server_info: Some(ServerInfo {
            name: env!("CARGO_PKG_NAME").to_owned(),
            version: Some(env!("CARGO_PKG_VERSION").to_owned()),
        }),
    }
}
