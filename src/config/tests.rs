//! Tests for config functionality.

use crate::config::operations::lossy_argv;
use crate::config::{Catalog, DEFAULT_PROGRAM, DEFAULT_WIDTH, Settings, WIDTH_ENV};
use crate::error::ConfigError;
use crate::test_support::{EnvGuard, catalog_file};
use serial_test::serial;
use std::ffi::OsString;

#[test]
fn test_default_settings() {
    let settings = Settings::default();

    assert_eq!(settings.width, DEFAULT_WIDTH);
    assert_eq!(settings.width, 70);
    assert!(settings.program_name.is_none());
    assert!(settings.argv.is_empty());
}

#[test]
fn test_argv_at_uses_file_name_of_argv0() {
    let settings = Settings::default().with_argv(vec![
        "/opt/tools/deploy".to_string(),
        "--dry-run".to_string(),
    ]);

    assert_eq!(settings.argv_at(0), Some("deploy"));
    assert_eq!(settings.argv_at(1), Some("--dry-run"));
    assert_eq!(settings.argv_at(2), None);
    assert_eq!(settings.argv_len(), 2);
}

#[test]
fn test_program_name_overrides_argv0() {
    let settings = Settings::default()
        .with_argv(vec!["target/debug/userexit".to_string()])
        .with_program_name("deploy");
    assert_eq!(settings.argv_at(0), Some("deploy"));

    let bare = Settings::default().with_program_name("deploy");
    assert_eq!(bare.argv_at(0), Some("deploy"));
    assert_eq!(bare.argv_len(), 1);
}

#[test]
fn test_argv0_falls_back_to_default_program() {
    let settings = Settings::default();
    assert_eq!(settings.argv_at(0), Some(DEFAULT_PROGRAM));
    assert_eq!(settings.argv_at(1), None);
    assert_eq!(settings.argv_len(), 1);
}

#[test]
fn test_lossy_argv_keeps_valid_arguments() {
    let argv = lossy_argv([OsString::from("tool"), OsString::from("café.txt")]);
    assert_eq!(argv, vec!["tool", "café.txt"]);
}

#[cfg(unix)]
#[test]
fn test_lossy_argv_replaces_invalid_unicode() {
    use std::os::unix::ffi::OsStringExt;

    let argv = lossy_argv([
        OsString::from("tool"),
        OsString::from_vec(b"caf\xe9.txt".to_vec()),
    ]);
    assert_eq!(argv, vec!["tool", "caf\u{FFFD}.txt"]);
}

#[test]
fn test_validate_rejects_zero_width() {
    let settings = Settings::default().with_width(0);
    let err = settings.validate().unwrap_err();
    assert!(err.to_string().contains("width must be greater than 0"));
}

#[test]
fn test_validate_rejects_blank_program_name() {
    let settings = Settings::default().with_program_name("  ");
    assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
#[serial]
fn test_from_env_reads_width_override() {
    let _env = EnvGuard::set(WIDTH_ENV, "40");
    let settings = Settings::from_env();

    assert_eq!(settings.width, 40);
    assert!(!settings.argv.is_empty());
}

#[test]
#[serial]
fn test_from_env_ignores_invalid_width() {
    let _env = EnvGuard::set(WIDTH_ENV, "wide");
    let settings = Settings::from_env();

    assert_eq!(settings.width, DEFAULT_WIDTH);
}

#[test]
fn test_parse_minimal_yaml() {
    let catalog = Catalog::from_yaml("").unwrap();

    // Should use all defaults
    assert_eq!(catalog.settings.width, DEFAULT_WIDTH);
    assert!(catalog.variants.is_empty());
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
width: 72
program_name: deploy
variants:
  - name: BadInputError
    exit_status: 3
    message: |
      Input {!r} should be set to {!r}.
      Please adjust your settings.
  - name: TargetFileMissingError
    exit_status: 4
    message: "Please ensure the target file {} exists."
    prefix_name: true
    prefix_error: true
  - name: NormalExit
    exit_status: 0
"#;
    let catalog = Catalog::from_yaml(yaml).unwrap();

    assert_eq!(catalog.settings.width, 72);
    assert_eq!(catalog.settings.program_name.as_deref(), Some("deploy"));
    assert_eq!(catalog.variants.len(), 3);
    assert_eq!(catalog.variants[0].exit_status, Some(3));
    assert!(catalog.variants[1].prefix_error);
    assert!(catalog.variants[2].message.is_none());
}

#[test]
fn test_parse_ignores_unknown_fields() {
    let yaml = r#"
width: 80
future_setting: yes
variants: []
"#;
    let catalog = Catalog::from_yaml(yaml).unwrap();
    assert_eq!(catalog.settings.width, 80);
}

#[test]
fn test_parse_rejects_invalid_yaml() {
    let result = Catalog::from_yaml("variants: {not: a list");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_parse_rejects_invalid_declarations() {
    let yaml = r#"
variants:
  - name: Twice
    exit_status: 3
  - name: Twice
    exit_status: 4
"#;
    let catalog = Catalog::from_yaml(yaml).unwrap();
    assert!(matches!(
        catalog.validate(),
        Err(ConfigError::DuplicateVariant { .. })
    ));
    assert!(matches!(
        catalog.registry(),
        Err(ConfigError::DuplicateVariant { .. })
    ));
}

#[test]
fn test_parse_rejects_invalid_settings() {
    let result = Catalog::from_yaml("width: 0\nvariants: []");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_registry_rejects_broken_template() {
    let yaml = r#"
variants:
  - name: Broken
    exit_status: 3
    message: "Input {0} and {}"
"#;
    let catalog = Catalog::from_yaml(yaml).unwrap();
    assert!(matches!(
        catalog.registry(),
        Err(ConfigError::Template { ref name, .. }) if name == "Broken"
    ));
}

#[test]
fn test_registry_assigns_statuses() {
    let yaml = r#"
variants:
  - name: Fixed
    exit_status: 80
  - name: Auto
"#;
    let catalog = Catalog::from_yaml(yaml).unwrap();
    let registry = catalog.registry().unwrap();
    assert_eq!(registry.status_of("Fixed"), Some(80));
    assert_eq!(registry.status_of("Auto"), Some(79));
}

#[test]
fn test_yaml_roundtrip_keeps_declarations() {
    let yaml = r#"
program_name: deploy
variants:
  - name: BadInputError
    exit_status: 3
    message: "Input {} should be set to {}."
"#;
    let catalog = Catalog::from_yaml(yaml).unwrap();
    let reparsed = Catalog::from_yaml(&catalog.to_yaml().unwrap()).unwrap();
    assert_eq!(reparsed.variants, catalog.variants);
    assert_eq!(reparsed.settings, catalog.settings);
}

#[test]
fn test_load_from_file() {
    let file = catalog_file("variants:\n  - name: BadInputError\n    exit_status: 3\n");

    let catalog = Catalog::load(file.path()).unwrap();
    assert_eq!(catalog.variants[0].name, "BadInputError");
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Catalog::load(dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}
