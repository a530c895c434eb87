//! Tests for the session controller.

mod behaviour;
pub(crate) mod support;
