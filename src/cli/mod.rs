//! CLI argument parsing for userexit.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Userexit: raise catalog-declared exits from shell scripts.
///
/// A catalog is a YAML file of variants, each with a stable exit status and
/// a message template. `raise` prints the rendered message to stderr and
/// exits with the variant's status, so scripts report failures the same way
/// compiled programs using the library do.
#[derive(Parser, Debug)]
#[command(name = "userexit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for userexit.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a variant to stderr and exit with its status.
    ///
    /// Options must come before NAME; everything after NAME is passed to
    /// the template as positional arguments.
    Raise(RaiseArgs),

    /// Validate a catalog.
    ///
    /// Checks settings, names, parents and statuses, and the placeholder
    /// syntax of every message.
    Check(CatalogArgs),

    /// List the variants of a catalog with their resolved statuses.
    List(ListArgs),
}

/// Location of the catalog file.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Path to the catalog YAML file.
    #[arg(long, short, env = "USEREXIT_CATALOG", default_value = "userexit.yaml")]
    pub catalog: PathBuf,
}

/// Arguments for the `raise` command.
#[derive(Args, Debug)]
pub struct RaiseArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Name shown for `{argv[0]}`.
    ///
    /// Falls back to the catalog's `program_name`, then to `userexit`.
    #[arg(long)]
    pub program: Option<String>,

    /// Named field for `{self.KEY}` placeholders.
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,

    /// Variant to raise.
    pub name: String,

    /// Positional template arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
