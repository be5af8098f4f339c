//! CLI argument definitions for the `asty` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::logging::LogFormat;
use crate::output::OutputFormat;

/// Command-line interface for the `asty` structural pattern matcher.
#[derive(Parser, Debug)]
#[command(name = "asty", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Reads configuration from a TOML file before applying the environment
    /// and flags.
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) config_path: Option<PathBuf>,
    /// Tracing filter expression, for example `asty=debug`.
    #[arg(long, global = true, value_name = "FILTER")]
    pub(crate) log_filter: Option<String>,
    /// Log line format: `json` or `compact`.
    #[arg(long, global = true, value_name = "FORMAT")]
    pub(crate) log_format: Option<LogFormat>,
    /// The command to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Structured subcommands for the `asty` CLI.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Matches a JSON pattern against a JSON syntax tree.
    Match(MatchArgs),
}

/// Arguments of `asty match`.
#[derive(Args, Debug, Clone)]
pub(crate) struct MatchArgs {
    /// Pattern file in the `NodeType`/`Rules` JSON format.
    #[arg(long, value_name = "FILE")]
    pub(crate) pattern: PathBuf,
    /// Syntax tree file; `-` or no value reads standard input.
    #[arg(long, value_name = "FILE")]
    pub(crate) input: Option<PathBuf>,
    /// Controls how results are rendered.
    #[arg(long, value_enum)]
    pub(crate) output: Option<OutputFormat>,
    /// Aborts the match after visiting this many nodes.
    #[arg(long, value_name = "N")]
    pub(crate) max_search_nodes: Option<usize>,
}

impl MatchArgs {
    /// Returns the input file, or `None` when standard input is requested.
    pub(crate) fn input_file(&self) -> Option<&std::path::Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}
