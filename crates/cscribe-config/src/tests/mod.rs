//! Unit tests for configuration parsing.

use std::fs;
use std::str::FromStr;

use std::path::PathBuf;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::{
    ClientOverrides, Config, ConfigError, DEFAULT_HEADER_DELAY_MS, Features, LogFormat, Timing,
};

struct ConfigDir {
    _dir: TempDir,
    path: PathBuf,
}

impl ConfigDir {
    fn write(&self, contents: &str) -> &str {
        fs::write(&self.path, contents).expect("write config");
        self.path.to_str().expect("utf-8 path")
    }
}

#[fixture]
fn config_dir() -> ConfigDir {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("cscribe.toml");
    ConfigDir { _dir: dir, path }
}

fn load_file(path: &str) -> Result<Config, ConfigError> {
    Config::load_from_args(["cscribed", "--config-path", path])
}

#[test]
fn defaults_enable_every_feature() {
    let config = Config::default();
    assert_eq!(config.features, Features::default());
    assert!(config.features.semicolons && config.features.headers);
    assert!(config.features.prototypes && config.features.diagnostics);
    assert_eq!(config.timing.header_delay_ms, DEFAULT_HEADER_DELAY_MS);
    assert_eq!(config.log_filter(), "info");
    assert_eq!(config.log_format(), LogFormat::Compact);
    assert_eq!(config.languages, vec![String::from("c")]);
}

#[rstest]
fn partial_file_keeps_remaining_defaults(config_dir: ConfigDir) {
    let path = config_dir.write("log_format = \"json\"\n[timing]\nprototype_delay_ms = 250\n");
    let config = load_file(path).expect("load config");
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.timing.prototype_delay_ms, 250);
    assert_eq!(config.timing.header_delay_ms, DEFAULT_HEADER_DELAY_MS);
    assert_eq!(config.log_filter, "info");
    assert_eq!(config.languages, vec![String::from("c")]);
}

#[rstest]
fn file_replaces_languages(config_dir: ConfigDir) {
    let path = config_dir.write("languages = [\"c\", \"objective-c\"]\n");
    let config = load_file(path).expect("load config");
    assert!(config.handles_language("objective-c"));
    assert!(config.handles_language("c"));
}

#[rstest]
#[case("log_format = \"yaml\"\n")]
#[case("[features]\nsemicolons = \"yes\"\n")]
#[case("log_filter = \n")]
fn malformed_files_fail_to_load(config_dir: ConfigDir, #[case] contents: &str) {
    let path = config_dir.write(contents);
    let error = load_file(path).expect_err("loading must fail");
    assert!(matches!(error, ConfigError::Load { .. }), "{error:?}");
    assert!(!error.is_informational());
}

#[rstest]
fn cli_flags_override_the_file(config_dir: ConfigDir) {
    let path = config_dir.write("log_filter = \"debug\"\nlog_format = \"json\"\n");
    let config = Config::load_from_args([
        "cscribed",
        "--config-path",
        path,
        "--log-filter",
        "trace",
        "--log-format",
        "compact",
    ])
    .expect("load config");
    assert_eq!(config.log_filter, "trace");
    assert_eq!(config.log_format, LogFormat::Compact);
}

#[test]
fn unknown_cli_log_format_is_rejected() {
    let error = Config::load_from_args(["cscribed", "--log-format", "yaml"])
        .expect_err("format is invalid");
    assert!(error.cli_error().is_some(), "{error:?}");
    assert!(!error.is_informational());
}

#[test]
fn help_is_informational() {
    let error = Config::load_from_args(["cscribed", "--help"]).expect_err("help exits early");
    assert!(error.is_informational());
}

#[test]
fn only_json_is_structured() {
    assert!(LogFormat::Json.is_structured());
    assert!(!LogFormat::Compact.is_structured());
}

#[rstest]
#[case("json", LogFormat::Json)]
#[case("COMPACT", LogFormat::Compact)]
fn log_format_parses_case_insensitively(#[case] text: &str, #[case] expected: LogFormat) {
    assert_eq!(LogFormat::from_str(text).expect("known format"), expected);
}

#[test]
fn client_overrides_replace_only_present_values() {
    let overrides: ClientOverrides = serde_json::from_value(serde_json::json!({
        "features": { "prototypes": false },
        "timing": { "headerDelayMs": 50, "editTimeoutMs": 500 }
    }))
    .expect("parse overrides");

    let mut config = Config::default();
    config.apply_client_overrides(overrides);

    assert!(!config.features.prototypes);
    assert!(config.features.semicolons);
    assert_eq!(config.timing.header_delay_ms, 50);
    assert_eq!(config.timing.edit_timeout_ms, 500);
    assert_eq!(
        config.timing.prototype_delay_ms,
        Timing::default().prototype_delay_ms
    );
}

#[test]
fn empty_client_overrides_change_nothing() {
    let overrides: ClientOverrides =
        serde_json::from_value(serde_json::json!({})).expect("parse overrides");
    let mut config = Config::default();
    config.apply_client_overrides(overrides);
    assert_eq!(config, Config::default());
}

#[rstest]
#[case("c", true)]
#[case("C", true)]
#[case("cpp", false)]
#[case("rust", false)]
fn language_classification(#[case] language: &str, #[case] expected: bool) {
    assert_eq!(Config::default().handles_language(language), expected);
}

#[test]
fn timing_converts_to_durations() {
    let timing = Timing::default();
    assert_eq!(timing.guard_release().as_millis(), 100);
    assert_eq!(timing.edit_timeout().as_millis(), 2000);
}
