//! Layered configuration for the CLI.
//!
//! `ortho_config` resolves every value from built-in defaults, then a TOML
//! file named by `--config-path` or `ASTY_CONFIG_PATH`, then `ASTY_*`
//! environment variables, then command-line flags.  The flags
//! are parsed by [`Cli`] first; only the configuration flags it saw are
//! forwarded to the loader, so the subcommand never reaches it.

use std::ffi::OsString;

use asty::EngineConfig;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, CliCommand};
use crate::errors::AppError;
use crate::logging::{DEFAULT_LOG_FILTER, LogFormat};
use crate::output::OutputFormat;

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ASTY")]
pub(crate) struct Config {
    #[ortho_config(default = String::from(DEFAULT_LOG_FILTER))]
    pub(crate) log_filter: String,
    #[ortho_config(default = LogFormat::default())]
    pub(crate) log_format: LogFormat,
    #[ortho_config(default = OutputFormat::default())]
    pub(crate) output: OutputFormat,
    pub(crate) max_search_nodes: Option<usize>,
}

impl Config {
    /// Resolves configuration for a parsed command line.
    pub(crate) fn load(cli: &Cli) -> Result<Self, AppError> {
        Self::load_from_iter(config_arguments(cli)).map_err(AppError::LoadConfiguration)
    }

    /// Returns the engine limits.
    pub(crate) const fn engine(&self) -> EngineConfig {
        EngineConfig::new(self.max_search_nodes)
    }
}

/// Rebuilds the argument list `ortho_config` understands from the flags the
/// user actually passed.
pub(crate) fn config_arguments(cli: &Cli) -> Vec<OsString> {
    let mut arguments = vec![OsString::from("asty")];
    let mut push = |flag: &str, value: Option<OsString>| {
        if let Some(text) = value {
            arguments.push(OsString::from(flag));
            arguments.push(text);
        }
    };

    push(
        "--config-path",
        cli.config_path.as_ref().map(|path| path.clone().into_os_string()),
    );
    push("--log-filter", cli.log_filter.as_ref().map(OsString::from));
    push(
        "--log-format",
        cli.log_format.map(|format| format.to_string().into()),
    );
    match &cli.command {
        CliCommand::Match(args) => {
            push("--output", args.output.map(|output| output.to_string().into()));
            push(
                "--max-search-nodes",
                args.max_search_nodes.map(|limit| limit.to_string().into()),
            );
        }
    }
    arguments
}
