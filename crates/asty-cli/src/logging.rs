//! Log output for the CLI.
//!
//! Engine crates emit `tracing` events under `asty::*` targets.  The CLI
//! routes them to stderr, leaving stdout to match results, with the filter
//! and line format taken from the resolved [`Config`].

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::subscriber::SetGlobalDefaultError;
use tracing::{Subscriber, debug};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::CLI_TARGET;
use crate::config::Config;

/// Default log filter expression.
pub(crate) const DEFAULT_LOG_FILTER: &str = "info";

static LOGGING_GUARD: OnceCell<()> = OnceCell::new();

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub(crate) enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}

/// Errors encountered while configuring log output.
#[derive(Debug, thiserror::Error)]
pub(crate) enum LoggingError {
    /// The configured filter is not a valid `EnvFilter` expression.
    #[error("invalid log filter {filter:?}: {message}")]
    Filter { filter: String, message: String },
    /// Another subscriber was installed first.
    #[error("failed to install log subscriber: {0}")]
    Install(SetGlobalDefaultError),
}

/// Installs the stderr subscriber on first use and records the resolved
/// configuration.
///
/// The first call in a process wins; later calls keep its subscriber, which
/// lets tests drive [`crate::run`] repeatedly.
pub(crate) fn initialise(config: &Config) -> Result<(), LoggingError> {
    LOGGING_GUARD.get_or_try_init(|| {
        tracing::subscriber::set_global_default(subscriber(config)?)
            .map_err(LoggingError::Install)
    })?;
    debug!(
        target: CLI_TARGET,
        log_format = %config.log_format,
        output = %config.output,
        max_search_nodes = ?config.max_search_nodes,
        "configuration resolved"
    );
    Ok(())
}

/// Builds the subscriber described by `config` without installing it.
pub(crate) fn subscriber(config: &Config) -> Result<Box<dyn Subscriber + Send + Sync>, LoggingError> {
    let filter = EnvFilter::try_new(&config.log_filter).map_err(|error| LoggingError::Filter {
        filter: config.log_filter.clone(),
        message: error.to_string(),
    })?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());

    Ok(match config.log_format {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    })
}
