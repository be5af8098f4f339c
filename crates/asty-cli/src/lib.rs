//! Command-line interface runtime for the `asty` pattern matcher.
//!
//! The module owns argument parsing, configuration layering, log set-up
//! and result rendering.  [`run`] is shared by the binary entrypoint
//! and by tests, which substitute the output streams.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use asty::{Engine, JsonNode};
use clap::Parser;
use tracing::{debug, info};

mod cli;
mod config;
mod errors;
mod logging;
mod output;

use cli::{Cli, CliCommand, MatchArgs};
use config::Config;
use errors::AppError;
use output::{OutputFormat, ResultRecord, render_human, render_json};

const CLI_TARGET: &str = "asty::cli";

/// Runs the CLI using the provided arguments and IO handles.
///
/// Help and version requests are written to `stdout` and succeed; every
/// other failure is reported as one line on `stderr` with a failing exit
/// code.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    match try_run(args, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::CliUsage(error)) if !error.use_stderr() => {
            if write!(stdout, "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            if writeln!(stderr, "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn try_run<I, W>(args: I, stdout: &mut W) -> Result<(), AppError>
where
    I: IntoIterator<Item = OsString>,
    W: Write,
{
    let cli = Cli::try_parse_from(args).map_err(AppError::CliUsage)?;
    let config = Config::load(&cli)?;
    logging::initialise(&config)?;

    match &cli.command {
        CliCommand::Match(match_args) => run_match(match_args, &config, stdout),
    }
}

fn run_match<W: Write>(args: &MatchArgs, config: &Config, stdout: &mut W) -> Result<(), AppError> {
    let engine = Engine::new(config.engine());

    let pattern_text = fs::read_to_string(&args.pattern).map_err(|source| AppError::ReadPattern {
        path: args.pattern.clone(),
        source,
    })?;
    let pattern = engine
        .compile_json(&pattern_text)
        .map_err(|source| AppError::Pattern {
            path: args.pattern.clone(),
            source,
        })?;
    debug!(target: CLI_TARGET, nodes = pattern.len(), "pattern loaded");

    let (name, tree_text) = read_input(args.input_file())?;
    let tree = JsonNode::parse(&tree_text).map_err(|source| AppError::Input {
        name: name.clone(),
        source,
    })?;

    let matches = engine.execute(&tree, &pattern)?;
    info!(target: CLI_TARGET, input = %name, results = matches.len(), "match finished");

    let records = matches
        .iter()
        .map(ResultRecord::from_result)
        .collect::<Result<Vec<_>, _>>()?;
    match config.output {
        OutputFormat::Human => render_human(&records, stdout),
        OutputFormat::Json => render_json(&records, stdout),
    }
}

/// Reads the syntax tree text, returning a display name for the source.
fn read_input(path: Option<&Path>) -> Result<(String, String), AppError> {
    match path {
        Some(file) => {
            let name = file.display().to_string();
            fs::read_to_string(file)
                .map(|text| (name.clone(), text))
                .map_err(|source| AppError::ReadInput { name, source })
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| AppError::ReadInput {
                    name: String::from("<stdin>"),
                    source,
                })?;
            Ok((String::from("<stdin>"), text))
        }
    }
}

#[cfg(test)]
mod tests;
