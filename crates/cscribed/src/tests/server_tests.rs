//! Protocol-level tests for the server.

use std::io::Cursor;

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use cscribe_config::Config;
use cscribe_session::{DocumentId, EditGuard};

use crate::error::ServerError;
use crate::event_loop::run;
use crate::jsonrpc::{INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR, SERVER_NOT_INITIALIZED};
use crate::server::Control;
use crate::tests::support::{MAIN_URI, TestClient, decode_frames, edit_of, encode_frames};

#[fixture]
fn client() -> TestClient {
    let mut client = TestClient::default();
    client.initialize();
    client
}

fn guard(client: &TestClient) -> EditGuard {
    client
        .server
        .controller()
        .and_then(|controller| controller.session(&DocumentId::new(MAIN_URI)))
        .expect("document tracked")
        .guard()
}

fn only(messages: Vec<Value>) -> Value {
    assert_eq!(messages.len(), 1, "expected one message: {messages:?}");
    messages.into_iter().next().expect("one message")
}

#[rstest]
fn requests_before_initialize_are_rejected() {
    let mut client = TestClient::default();
    client.request(1, "shutdown", Value::Null);
    assert_eq!(
        client.response(1)["error"]["code"],
        json!(SERVER_NOT_INITIALIZED)
    );
}

#[rstest]
fn initialize_advertises_incremental_sync(client: TestClient) {
    let result = &client.response(0)["result"];
    let sync = &result["capabilities"]["textDocumentSync"];
    assert_eq!(sync["openClose"], json!(true));
    assert_eq!(sync["change"], json!(2));
    assert_eq!(sync["save"], json!(true));
    assert_eq!(result["serverInfo"]["name"], json!("cscribed"));
}

#[rstest]
fn initialization_options_override_features() {
    let mut client = TestClient::default();
    client.request(
        0,
        "initialize",
        json!({
            "capabilities": {},
            "initializationOptions": {
                "features": {"headers": false},
                "timing": {"prototypeDelayMs": 250},
            },
        }),
    );
    let config = client.server.controller().expect("initialized").config();
    assert!(!config.features.headers);
    assert!(config.features.prototypes);
    assert_eq!(config.timing.prototype_delay_ms, 250);
}

#[rstest]
fn malformed_initialization_options_are_invalid_params() {
    let mut client = TestClient::default();
    client.request(
        0,
        "initialize",
        json!({"initializationOptions": {"features": {"headers": "no"}}}),
    );
    assert_eq!(client.response(0)["error"]["code"], json!(INVALID_PARAMS));
    assert!(client.server.controller().is_none());
}

#[rstest]
fn unknown_requests_are_method_not_found(mut client: TestClient) {
    client.request(5, "textDocument/hover", json!({}));
    assert_eq!(client.response(5)["error"]["code"], json!(METHOD_NOT_FOUND));
}

#[rstest]
fn unknown_notifications_are_ignored(mut client: TestClient) {
    let before = client.sent().len();
    assert_eq!(
        client.notify("$/setTrace", json!({"value": "off"})),
        Control::Continue
    );
    assert_eq!(client.sent().len(), before);
}

#[rstest]
fn malformed_payloads_get_a_parse_error(mut client: TestClient) {
    let now = client.now();
    client
        .server
        .handle_payload(b"{not json", now)
        .expect("parse errors are answered");
    let last = client.sent().pop().expect("error response");
    assert_eq!(last["id"], Value::Null);
    assert_eq!(last["error"]["code"], json!(PARSE_ERROR));
}

#[rstest]
fn typed_newline_sends_a_labelled_terminator_edit(mut client: TestClient) {
    client.open("int x = 1");
    client.insert(2, 0, 9, "\n");

    let request = only(client.outgoing("workspace/applyEdit"));
    assert_eq!(request["params"]["label"], json!("cscribe: terminator"));
    let document_edit = &request["params"]["edit"]["documentChanges"][0];
    assert_eq!(
        document_edit["textDocument"],
        json!({"uri": MAIN_URI, "version": 2})
    );
    assert_eq!(edit_of(&request)["newText"], json!(";"));
    assert_eq!(
        edit_of(&request)["range"]["start"],
        json!({"line": 0, "character": 9})
    );
    assert!(request["params"]["edit"].get("changes").is_none());
    assert!(matches!(guard(&client), EditGuard::InFlight { .. }));
}

#[rstest]
fn applied_edit_echo_is_ignored(mut client: TestClient) {
    client.open("int x = 1");
    client.insert(2, 0, 9, "\n");
    let request = only(client.outgoing("workspace/applyEdit"));

    client.insert(3, 0, 9, ";");
    client.answer_edit(&request["id"], true);

    assert!(matches!(guard(&client), EditGuard::Cooling { .. }));
    assert_eq!(client.outgoing("workspace/applyEdit").len(), 1);
    let document = DocumentId::new(MAIN_URI);
    assert_eq!(
        client.server.host_text(&document).as_deref(),
        Some("int x = 1;\n")
    );
}

#[rstest]
fn rejected_edit_releases_the_guard(mut client: TestClient) {
    client.open("int x = 1");
    client.insert(2, 0, 9, "\n");
    let request = only(client.outgoing("workspace/applyEdit"));

    client.answer_edit(&request["id"], false);

    assert_eq!(guard(&client), EditGuard::Idle);
}

#[rstest]
fn leaving_a_line_sends_a_terminator_edit(mut client: TestClient) {
    client.open("int x = 1\nint y = 2;\n");
    let cursor = |line: u32| json!({"textDocument": {"uri": MAIN_URI}, "line": line});

    client.notify("cscribe/cursorMoved", cursor(0));
    assert!(client.outgoing("workspace/applyEdit").is_empty());

    client.notify("cscribe/cursorMoved", cursor(1));
    let request = only(client.outgoing("workspace/applyEdit"));
    assert_eq!(
        edit_of(&request)["range"]["start"],
        json!({"line": 0, "character": 9})
    );
}

#[rstest]
fn header_pass_runs_after_the_delay(mut client: TestClient) {
    client.open("int main(void) {\n    printf(\"hi\\n\");\n    return 0;\n}\n");

    client.advance(799);
    assert!(client.outgoing("workspace/applyEdit").is_empty());

    client.advance(1);
    let request = only(client.outgoing("workspace/applyEdit"));
    assert_eq!(request["params"]["label"], json!("cscribe: headers"));
    let edit = edit_of(&request);
    assert_eq!(edit["newText"], json!("#include <stdio.h>\n\n"));
    assert_eq!(edit["range"]["start"], json!({"line": 0, "character": 0}));
}

#[rstest]
fn edits_are_pinned_to_the_version_they_were_computed_from(mut client: TestClient) {
    client.open("int main(void) {\n    printf(\"hi\\n\");\n    return 0;\n}\n");
    client.advance(800);
    let request = only(client.outgoing("workspace/applyEdit"));
    assert_eq!(
        request["params"]["edit"]["documentChanges"][0]["textDocument"]["version"],
        json!(1)
    );

    // The user keeps typing before the client gets to the edit, so the
    // client refuses it as stale.
    client.insert(2, 0, 0, "\n");
    client.answer_edit(&request["id"], false);

    assert_eq!(guard(&client), EditGuard::Idle);
    let document = DocumentId::new(MAIN_URI);
    let text = client.server.host_text(&document).expect("document mirrored");
    assert!(!text.contains("#include"), "{text}");
}

#[rstest]
fn save_publishes_diagnostics(mut client: TestClient) {
    client.open("#include <string.h>\n\nvoid f(char *d) {\n    strcpy(d, \"x\");\n}\n");
    client.save();

    let published = only(client.outgoing("textDocument/publishDiagnostics"));
    assert_eq!(published["params"]["uri"], json!(MAIN_URI));
    assert_eq!(published["params"]["version"], json!(1));
    let diagnostic = &published["params"]["diagnostics"][0];
    assert_eq!(diagnostic["code"], json!("unsafe-function"));
    assert_eq!(diagnostic["source"], json!("cscribe"));
    assert_eq!(diagnostic["severity"], json!(2));
    assert_eq!(
        diagnostic["range"]["start"],
        json!({"line": 3, "character": 4})
    );
}

#[rstest]
fn close_clears_diagnostics(mut client: TestClient) {
    client.open("int main(void) { return 0; }\n");
    client.notify(
        "textDocument/didClose",
        json!({"textDocument": {"uri": MAIN_URI}}),
    );

    let published = only(client.outgoing("textDocument/publishDiagnostics"));
    assert_eq!(published["params"]["diagnostics"], json!([]));
    let controller = client.server.controller().expect("initialized");
    assert!(controller.session(&DocumentId::new(MAIN_URI)).is_none());
    assert_eq!(client.server.host_text(&DocumentId::new(MAIN_URI)), None);
}

#[rstest]
fn other_languages_are_mirrored_but_not_tracked(mut client: TestClient) {
    client.notify(
        "textDocument/didOpen",
        json!({"textDocument": {
            "uri": "file:///workspace/tool.py",
            "languageId": "python",
            "version": 1,
            "text": "x = 1\n",
        }}),
    );
    client.advance(2000);

    let document = DocumentId::new("file:///workspace/tool.py");
    let controller = client.server.controller().expect("initialized");
    assert!(controller.session(&document).is_none());
    assert!(client.outgoing("workspace/applyEdit").is_empty());
}

#[rstest]
#[case("strcpy", "searchResults")]
#[case("   ", "searchPrompt")]
fn search_answers_with_the_panel_shape(
    mut client: TestClient,
    #[case] query: &str,
    #[case] command: &str,
) {
    client.request(9, "cscribe/search", json!({"query": query}));
    let result = &client.response(9)["result"];
    assert_eq!(result["command"], json!(command));
}

#[rstest]
fn search_results_carry_reference_entries(mut client: TestClient) {
    client.request(9, "cscribe/search", json!({"query": "strcpy"}));
    let result = client.response(9);
    let results = result["result"]["results"]
        .as_array()
        .expect("results array");
    let entry = results
        .iter()
        .find(|entry| entry["name"] == json!("strcpy"))
        .expect("strcpy entry");
    assert_eq!(entry["header"], json!("string.h"));
    assert!(entry.get("returnValue").is_some());
}

#[rstest]
fn search_without_query_is_invalid_params(mut client: TestClient) {
    client.request(9, "cscribe/search", json!({}));
    assert_eq!(client.response(9)["error"]["code"], json!(INVALID_PARAMS));
}

#[rstest]
fn exit_after_shutdown_is_clean(mut client: TestClient) {
    client.request(1, "shutdown", Value::Null);
    assert_eq!(client.response(1)["result"], Value::Null);
    assert_eq!(client.notify("exit", Value::Null), Control::Exit);
    assert!(client.server.finish().is_ok());
}

#[rstest]
fn exit_without_shutdown_is_an_error(mut client: TestClient) {
    assert_eq!(client.notify("exit", Value::Null), Control::Exit);
    assert!(matches!(
        client.server.finish(),
        Err(ServerError::ExitWithoutShutdown)
    ));
}

#[rstest]
fn run_serves_a_full_session_over_streams() {
    let input = encode_frames(&[
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"capabilities": {}}}),
        json!({"jsonrpc": "2.0", "method": "initialized", "params": {}}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "shutdown"}),
        json!({"jsonrpc": "2.0", "method": "exit"}),
    ]);
    let mut output = Vec::new();

    run(Config::default(), Cursor::new(input), &mut output).expect("clean exit");

    let responses = decode_frames(&output);
    assert_eq!(responses.len(), 2);
    assert!(responses.iter().all(|response| response.get("error").is_none()));
}

#[rstest]
fn run_reports_input_closed_before_shutdown() {
    let input = encode_frames(&[json!({
        "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"capabilities": {}}
    })]);
    let mut output = Vec::new();

    let outcome = run(Config::default(), Cursor::new(input), &mut output);

    assert!(matches!(outcome, Err(ServerError::ExitWithoutShutdown)));
}
