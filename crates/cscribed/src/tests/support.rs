//! An in-memory LSP client driving [`Server`] with a simulated clock.

use std::io::Cursor;
use std::time::{Duration, Instant};

use serde_json::{Value, json};

use cscribe_config::Config;

use crate::server::{Control, Server};
use crate::transport::{MessageReader, MessageWriter};

/// URI of the document most tests open.
pub const MAIN_URI: &str = "file:///workspace/main.c";

/// Drives a server the way an editor would.
pub struct TestClient {
    pub server: Server<Vec<u8>>,
    start: Instant,
    elapsed_ms: u64,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl TestClient {
    pub fn new(config: Config) -> Self {
        Self {
            server: Server::new(config, Vec::new()),
            start: Instant::now(),
            elapsed_ms: 0,
        }
    }

    pub fn now(&self) -> Instant {
        self.start + Duration::from_millis(self.elapsed_ms)
    }

    /// Encodes `message` as a payload and hands it to the server.
    pub fn send(&mut self, message: &Value) -> Control {
        let payload = serde_json::to_vec(message).expect("serialise message");
        let now = self.now();
        self.server
            .handle_payload(&payload, now)
            .expect("message handled")
    }

    pub fn request(&mut self, id: i64, method: &str, params: Value) -> Control {
        self.send(&json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))
    }

    pub fn notify(&mut self, method: &str, params: Value) -> Control {
        self.send(&json!({"jsonrpc": "2.0", "method": method, "params": params}))
    }

    /// Answers a `workspace/applyEdit` request.
    pub fn answer_edit(&mut self, id: &Value, applied: bool) {
        self.send(&json!({"jsonrpc": "2.0", "id": id, "result": {"applied": applied}}));
    }

    pub fn initialize(&mut self) {
        self.request(0, "initialize", json!({"capabilities": {}}));
        self.notify("initialized", json!({}));
    }

    pub fn open(&mut self, text: &str) {
        self.notify(
            "textDocument/didOpen",
            json!({"textDocument": {
                "uri": MAIN_URI,
                "languageId": "c",
                "version": 1,
                "text": text,
            }}),
        );
    }

    /// Inserts `text` at `line`:`character`.
    pub fn insert(&mut self, version: i32, line: u32, character: u32, text: &str) {
        let at = json!({"line": line, "character": character});
        self.notify(
            "textDocument/didChange",
            json!({
                "textDocument": {"uri": MAIN_URI, "version": version},
                "contentChanges": [{"range": {"start": at, "end": at}, "text": text}],
            }),
        );
    }

    pub fn save(&mut self) {
        self.notify(
            "textDocument/didSave",
            json!({"textDocument": {"uri": MAIN_URI}}),
        );
    }

    /// Advances the clock and runs due passes.
    pub fn advance(&mut self, millis: u64) {
        self.elapsed_ms += millis;
        let now = self.now();
        self.server.poll(now);
    }

    /// Every message the server has written so far.
    pub fn sent(&self) -> Vec<Value> {
        decode_frames(self.server.output())
    }

    /// The response to request `id`.
    pub fn response(&self, id: i64) -> Value {
        self.sent()
            .into_iter()
            .find(|message| message.get("method").is_none() && message["id"] == json!(id))
            .expect("response sent")
    }

    /// Messages sent by the server with `method`.
    pub fn outgoing(&self, method: &str) -> Vec<Value> {
        self.sent()
            .into_iter()
            .filter(|message| message["method"] == json!(method))
            .collect()
    }
}

/// The single text edit of a `workspace/applyEdit` request.
pub fn edit_of(request: &Value) -> &Value {
    &request["params"]["edit"]["documentChanges"][0]["edits"][0]
}

/// Splits framed output into JSON values.
pub fn decode_frames(bytes: &[u8]) -> Vec<Value> {
    let mut reader = MessageReader::new(Cursor::new(bytes.to_vec()));
    let mut messages = Vec::new();
    while let Some(payload) = reader.receive().expect("well-formed frame") {
        messages.push(serde_json::from_slice(&payload).expect("valid json"));
    }
    messages
}

/// Frames `messages` the way a client writes them to stdin.
pub fn encode_frames(messages: &[Value]) -> Vec<u8> {
    let mut writer = MessageWriter::new(Vec::new());
    for message in messages {
        let payload = serde_json::to_vec(message).expect("serialise message");
        writer.send(&payload).expect("write frame");
    }
    writer.into_inner()
}

