//! Command implementations for userexit.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the catalog loading they share. Failures are
//! returned as [`UserExit`]s inside `anyhow::Error`; the boundary in `main`
//! turns them into a message and an exit status.

mod check;
mod failures;
mod list;
mod raise;

use crate::cli::Command;
use std::path::Path;
use std::process::ExitCode;
use userexit::{Catalog, ConfigError, Registry, UserExit};

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Raise(args) => raise::cmd_raise(args),
        Command::Check(args) => check::cmd_check(args),
        Command::List(args) => list::cmd_list(args),
    }
}

/// Load a catalog and resolve its declarations.
///
/// An unreadable file and an invalid catalog are reported as different user
/// exits so scripts can tell them apart.
fn load_catalog(path: &Path) -> Result<(Catalog, Registry), UserExit> {
    let catalog = Catalog::load(path).map_err(|err| match err {
        ConfigError::Read { source, .. } => failures::catalog_unreadable(path, source),
        other => failures::catalog_invalid(path, other),
    })?;
    let registry = catalog
        .registry()
        .map_err(|err| failures::catalog_invalid(path, err))?;

    tracing::debug!(
        catalog = %path.display(),
        variants = registry.len(),
        "loaded catalog"
    );
    Ok((catalog, registry))
}
