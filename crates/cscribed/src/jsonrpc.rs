//! JSON-RPC 2.0 message types for LSP communication.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

const JSONRPC_VERSION: &str = "2.0";

/// Standard error code for malformed JSON.
pub const PARSE_ERROR: i64 = -32700;
/// Standard error code for a message that is not a valid request.
pub const INVALID_REQUEST: i64 = -32600;
/// Standard error code for an unknown method.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Standard error code for parameters that do not match the method.
pub const INVALID_PARAMS: i64 = -32602;
/// Standard error code for a failure inside the server.
pub const INTERNAL_ERROR: i64 = -32603;
/// LSP error code for requests sent before `initialize`.
pub const SERVER_NOT_INITIALIZED: i64 = -32002;

/// Identifier of a request, chosen by its sender.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric identifier.
    Number(i64),
    /// String identifier.
    String(String),
}

impl fmt::Display for RequestId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(formatter, "{number}"),
            Self::String(text) => formatter.write_str(text),
        }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Builds an error without data.
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// `MethodNotFound` for `method`.
    #[must_use]
    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("method not found: {method}"))
    }

    /// `InvalidParams` with a description of the problem.
    #[must_use]
    pub fn invalid_params(detail: impl fmt::Display) -> Self {
        Self::new(INVALID_PARAMS, format!("invalid params: {detail}"))
    }
}

/// A message received from the client.
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    /// A request expecting a response.
    Request {
        /// Identifier to answer with.
        id: RequestId,
        /// Method name.
        method: String,
        /// Parameters, `null` when absent.
        params: Value,
    },
    /// A notification.
    Notification {
        /// Method name.
        method: String,
        /// Parameters, `null` when absent.
        params: Value,
    },
    /// A response to a request the server sent.
    Response {
        /// Identifier of the server's request.
        id: RequestId,
        /// Result on success.
        result: Option<Value>,
        /// Error on failure.
        error: Option<JsonRpcError>,
    },
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(default)]
    id: Option<RequestId>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    params: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

impl Incoming {
    /// Decodes one payload.
    ///
    /// Returns `Ok(None)` for well-formed JSON that is neither a request, a
    /// notification, nor a response.
    ///
    /// # Errors
    ///
    /// Returns the decoding error when the payload is not a JSON-RPC object.
    pub fn parse(payload: &[u8]) -> Result<Option<Self>, serde_json::Error> {
        let raw: RawMessage = serde_json::from_slice(payload)?;
        let params = raw.params.unwrap_or(Value::Null);
        Ok(match (raw.id, raw.method) {
            (Some(id), Some(method)) => Some(Self::Request { id, method, params }),
            (None, Some(method)) => Some(Self::Notification { method, params }),
            (Some(id), None) => Some(Self::Response {
                id,
                result: raw.result,
                error: raw.error,
            }),
            (None, None) => None,
        })
    }
}

/// A request sent by the server.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    jsonrpc: &'static str,
    /// Request identifier.
    pub id: RequestId,
    /// The method to invoke.
    pub method: String,
    /// Parameters.
    pub params: Value,
}

impl JsonRpcRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(id: RequestId, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method: method.into(),
            params,
        }
    }
}

/// A notification sent by the server.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcNotification {
    jsonrpc: &'static str,
    /// The method to invoke.
    pub method: String,
    /// Parameters.
    pub params: Value,
}

impl JsonRpcNotification {
    /// Creates a notification.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: method.into(),
            params,
        }
    }
}

/// A response sent by the server.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: &'static str,
    /// The request answered; `null` when it could not be determined.
    pub id: Option<RequestId>,
    /// Result on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// A successful response.
    #[must_use]
    pub const fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    /// An error response.
    #[must_use]
    pub const fn failure(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }
}
