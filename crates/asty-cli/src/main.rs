//! CLI entrypoint for the `asty` pattern matcher.
//!
//! The binary delegates to [`asty_cli::run`], which parses arguments, loads
//! configuration, runs the requested command and renders its output.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    asty_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
