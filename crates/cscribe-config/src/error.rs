use std::error::Error as StdError;
use std::sync::Arc;

use ortho_config::OrthoError;
use thiserror::Error;

/// Errors raised while assembling the configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Arguments, a configuration file or the environment were rejected.
    #[error("failed to load configuration: {source}")]
    Load {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
}

impl ConfigError {
    pub(crate) const fn load(source: Arc<OrthoError>) -> Self {
        Self::Load { source }
    }

    /// The command-line parse error behind this failure, if any.
    #[must_use]
    pub fn cli_error(&self) -> Option<&clap::Error> {
        let mut cause: Option<&(dyn StdError + 'static)> = self.source();
        while let Some(current) = cause {
            if let Some(cli) = current.downcast_ref::<clap::Error>() {
                return Some(cli);
            }
            if let Some(cli) = current.downcast_ref::<Box<clap::Error>>() {
                return Some(cli.as_ref());
            }
            cause = current.source();
        }
        None
    }

    /// Whether the error is a request for `--help` or `--version` output.
    #[must_use]
    pub fn is_informational(&self) -> bool {
        self.cli_error().is_some_and(|cli| {
            matches!(
                cli.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            )
        })
    }
}
