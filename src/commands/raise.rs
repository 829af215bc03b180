//! Implementation of the `userexit raise` command.
//!
//! Renders a catalog variant to stderr and returns its exit status. This is
//! the shell-script counterpart of returning a `UserExit` from `main`.

use super::{failures, load_catalog};
use crate::cli::RaiseArgs;
use std::io;
use std::process::ExitCode;
use userexit::config::DEFAULT_PROGRAM;
use userexit::{Settings, Termination};

/// Execute the `userexit raise` command.
///
/// The catalog's settings apply, with `{argv[0]}` set to the program name and
/// `{argv[1]}`.. to the positional arguments.
pub fn cmd_raise(args: RaiseArgs) -> anyhow::Result<ExitCode> {
    let path = args.catalog.catalog;
    let (catalog, registry) = load_catalog(&path)?;

    let exit = registry
        .raise(&args.name)
        .map_err(|_| failures::unknown_variant(&args.name, &path))?;
    let exit = args
        .fields
        .into_iter()
        .fold(exit.args(&args.args), |exit, (key, value)| {
            exit.with_field(key, value)
        });

    let settings = raise_settings(catalog.settings, args.program, args.args);
    let termination = Termination::from_user_exit(&exit, &settings)
        .map_err(|defect| failures::render_failed(&args.name, defect))?;

    tracing::debug!(variant = %args.name, status = termination.status, "raising");
    if let Err(err) = termination.write_to(&mut io::stderr().lock()) {
        tracing::warn!(variant = %args.name, error = %err, "failed to write exit message");
    }
    Ok(termination.exit_code())
}

fn raise_settings(catalog: Settings, program: Option<String>, args: Vec<String>) -> Settings {
    let program = program
        .or_else(|| catalog.program_name.clone())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
    let argv = std::iter::once(program.clone()).chain(args).collect();
    catalog.with_program_name(program).with_argv(argv)
}
