use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How `cscribed` renders log lines on stderr.
///
/// Editors usually capture a language server's stderr into an output pane,
/// where `compact` reads best; `json` suits log shippers.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, fields flattened.
    Json,
    /// One human-readable line per event.
    #[default]
    Compact,
}

impl LogFormat {
    /// Whether lines are machine-readable and must never carry ANSI colour.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Error returned when `--log-format` or `CSCRIBE_LOG_FORMAT` names an
/// unknown format.
pub type LogFormatParseError = strum::ParseError;
