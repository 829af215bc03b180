//! Userexit: raise catalog-declared exits from shell scripts.
//!
//! This is the main entry point for the `userexit` CLI. It parses arguments
//! and dispatches to the appropriate command handler inside the same boundary
//! the library offers to other programs, so the CLI's own failures are user
//! exits with their own statuses.

mod cli;
mod commands;
mod logging;

use cli::Cli;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    logging::init();
    let cli = Cli::parse_args();

    userexit::handle(|| commands::dispatch(cli.command))()
}
