//! Implementation of the `userexit check` command.

use super::load_catalog;
use crate::cli::CatalogArgs;
use std::process::ExitCode;
use userexit::Registry;
use userexit::exit_codes;

/// Execute the `userexit check` command.
///
/// Loading the catalog already rejects every hard error. What is left to
/// report are statuses a shell gives its own meaning to.
pub fn cmd_check(args: CatalogArgs) -> anyhow::Result<ExitCode> {
    let (catalog, registry) = load_catalog(&args.catalog)?;

    println!("Catalog {} is valid.", args.catalog.display());
    println!();
    println!("  Variants: {}", registry.declared().count());
    println!("  Width:    {}", catalog.settings.width);
    if let Some(program) = &catalog.settings.program_name {
        println!("  Program:  {}", program);
    }

    let reserved = reserved_statuses(&registry);
    if !reserved.is_empty() {
        println!();
        println!("Warnings:");
        for (name, status) in reserved {
            println!("  - {} exits with {}, which shells also use", name, status);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn reserved_statuses(registry: &Registry) -> Vec<(&str, i32)> {
    registry
        .declared()
        .filter_map(|variant| Some((&*variant.name, variant.exit_status?)))
        .filter(|(_, status)| exit_codes::SHELL_RESERVED.contains(status))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use userexit::Variant;

    #[test]
    fn reserved_statuses_are_reported() {
        let registry = Registry::load(vec![
            Variant::new("Fine", Some(3), None),
            Variant::new("NotFound", Some(127), None),
            Variant::new("Signal", Some(130), None),
        ])
        .unwrap();
        assert_eq!(
            reserved_statuses(&registry),
            vec![("NotFound", 127), ("Signal", 130)]
        );
    }
}
