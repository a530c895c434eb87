//! Layered configuration for the cscribe language server.
//!
//! [`Config`] derives `OrthoConfig`, which resolves values in this order,
//! later layers winning:
//!
//! 1. built-in defaults,
//! 2. a TOML file named by `--config-path` or `CSCRIBE_CONFIG_PATH`, or
//!    discovered in the usual per-user and per-project locations,
//! 3. `CSCRIBE_*` environment variables such as `CSCRIBE_LOG_FILTER`,
//! 4. the `--log-filter` and `--log-format` flags.
//!
//! Editor clients may then adjust features and timing through
//! [`Config::apply_client_overrides`].
//!
//! # Example
//!
//! ```toml
//! log_filter = "cscribe_session=debug,info"
//! log_format = "json"
//! languages = ["c"]
//!
//! [features]
//! prototypes = false
//!
//! [timing]
//! header_delay_ms = 500
//! ```

mod defaults;
mod error;
mod logging;
mod settings;

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_EDIT_TIMEOUT_MS, DEFAULT_GUARD_RELEASE_MS, DEFAULT_HEADER_DELAY_MS, DEFAULT_LOG_FILTER,
    DEFAULT_PROTOTYPE_DELAY_MS, default_languages, default_log_filter, default_log_filter_string,
    default_log_format,
};
pub use error::ConfigError;
pub use logging::{LogFormat, LogFormatParseError};
pub use settings::{ClientOverrides, FeatureOverrides, Features, Timing, TimingOverrides};

/// Resolved configuration shared by the server components.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "CSCRIBE")]
pub struct Config {
    /// `tracing` filter expression, for example `cscribe_session=debug`.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Log output format: `json` or `compact`.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Pass switches.
    #[ortho_config(skip_cli)]
    pub features: Features,
    /// Debounce and guard timing.
    #[ortho_config(skip_cli)]
    pub timing: Timing,
    /// Language identifiers the session controller tracks.
    #[ortho_config(skip_cli)]
    pub languages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            features: Features::default(),
            timing: Timing::default(),
            languages: default_languages(),
        }
    }
}

impl Config {
    /// Loads the configuration from process arguments, files and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when arguments are invalid or a
    /// configuration layer cannot be read or merged.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as OrthoConfig>::load_from_iter(args).map_err(ConfigError::load)
    }

    /// Applies settings supplied by the editor client.
    pub const fn apply_client_overrides(&mut self, overrides: ClientOverrides) {
        self.features.apply(overrides.features);
        self.timing.apply(overrides.timing);
    }

    /// Returns the configured log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the configured log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Whether documents with `language_id` are tracked.
    #[must_use]
    pub fn handles_language(&self, language_id: &str) -> bool {
        self.languages
            .iter()
            .any(|language| language.eq_ignore_ascii_case(language_id))
    }
}

#[cfg(test)]
mod tests;
