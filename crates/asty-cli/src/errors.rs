//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use asty::{AdapterError, LoadError, MatchError};
use thiserror::Error;

use crate::logging::LoggingError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] LoggingError),
    #[error("failed to read pattern {}: {source}", path.display())]
    ReadPattern { path: PathBuf, source: io::Error },
    #[error("invalid pattern {}: {source}", path.display())]
    Pattern { path: PathBuf, source: LoadError },
    #[error("failed to read syntax tree from {name}: {source}")]
    ReadInput { name: String, source: io::Error },
    #[error("invalid syntax tree from {name}: {source}")]
    Input { name: String, source: LoadError },
    #[error("matching failed: {0}")]
    Match(#[from] MatchError),
    #[error("failed to inspect matched node: {0}")]
    Inspect(#[from] AdapterError),
    #[error("failed to serialise results: {0}")]
    SerialiseOutput(serde_json::Error),
    #[error("failed to write results: {0}")]
    WriteOutput(io::Error),
}
