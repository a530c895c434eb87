//! Entry point for the `cscribed` language server.

use std::env;
use std::io::{self, BufReader};
use std::process::ExitCode;

use cscribe_config::{Config, ConfigError};
use tracing::{debug, error};

fn main() -> ExitCode {
    let config = match Config::load_from_args(env::args_os()) {
        Ok(config) => config,
        Err(load_error) => return bootstrap_failed(&load_error),
    };

    match cscribed::initialise_telemetry(&config) {
        Ok(telemetry) => debug!(
            target: "cscribed::lsp",
            filter = telemetry.filter(),
            format = %telemetry.format(),
            "telemetry installed"
        ),
        Err(telemetry_error) => {
            report(&telemetry_error);
            return ExitCode::FAILURE;
        }
    }

    let input = BufReader::new(io::stdin());
    match cscribed::run(config, input, io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(run_error) => {
            error!(target: "cscribed::lsp", error = %run_error, "server stopped");
            ExitCode::FAILURE
        }
    }
}

/// Prints `--help`/`--version` output or the error chain.
fn bootstrap_failed(load_error: &ConfigError) -> ExitCode {
    if let Some(cli_error) = load_error.cli_error() {
        if cli_error.print().is_err() {
            return ExitCode::FAILURE;
        }
    } else {
        report(load_error);
    }
    if load_error.is_informational() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[expect(
    clippy::print_stderr,
    reason = "telemetry is not yet installed when bootstrap fails"
)]
fn report(error: &dyn std::error::Error) {
    eprintln!("cscribed: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
