use crate::logging::LogFormat;

/// Default log filter expression used by the server.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Delay before a header pass runs after the last trigger.
pub const DEFAULT_HEADER_DELAY_MS: u64 = 800;

/// Delay before a prototype pass runs after the last trigger.
pub const DEFAULT_PROTOTYPE_DELAY_MS: u64 = 1500;

/// Time the re-entrancy guard stays held after an edit completes.
pub const DEFAULT_GUARD_RELEASE_MS: u64 = 100;

/// Time after which an unconfirmed edit releases the guard.
pub const DEFAULT_EDIT_TIMEOUT_MS: u64 = 2000;

/// Default log filter expression used by the server.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the server.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Language identifiers handled by default.
#[must_use]
pub fn default_languages() -> Vec<String> {
    vec![String::from("c")]
}
