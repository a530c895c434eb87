//! Tests for the language server.

mod server_tests;
pub(crate) mod support;
