//! Implementation of the `userexit list` command.

use super::load_catalog;
use crate::cli::ListArgs;
use serde::Serialize;
use std::process::ExitCode;
use userexit::template::normalize;
use userexit::{Registry, Variant};

/// One row of the listing.
#[derive(Debug, Serialize)]
struct Entry<'a> {
    name: &'a str,
    exit_status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extends: Option<&'a str>,
    /// Normalized template, placeholders left in place.
    message: Option<String>,
    builtin: bool,
}

impl<'a> Entry<'a> {
    fn new(variant: &'a Variant) -> Self {
        Self {
            name: &variant.name,
            exit_status: variant.exit_status,
            extends: variant.extends.as_deref(),
            message: variant.message.as_deref().map(normalize),
            builtin: variant.is_builtin(),
        }
    }

    fn summary(&self) -> &str {
        self.message
            .as_deref()
            .and_then(|message| message.lines().next())
            .unwrap_or("(silent)")
    }
}

/// Execute the `userexit list` command.
pub fn cmd_list(args: ListArgs) -> anyhow::Result<ExitCode> {
    let (_, registry) = load_catalog(&args.catalog.catalog)?;
    let entries = entries(&registry);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(ExitCode::SUCCESS);
    }

    let name_width = entries
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    println!("{:>6}  {:name_width$}  MESSAGE", "STATUS", "NAME");
    for entry in &entries {
        let status = entry
            .exit_status
            .map(|status| status.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:>6}  {:name_width$}  {}", status, entry.name, entry.summary());
    }

    Ok(ExitCode::SUCCESS)
}

fn entries(registry: &Registry) -> Vec<Entry<'_>> {
    registry.iter().map(|variant| Entry::new(variant)).collect()
}
