//! End-to-end tests for the `userexit` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const CATALOG: &str = r#"
program_name: deploy
variants:
  - name: BadInputError
    exit_status: 3
    message: "Input {} should be set to {}."
  - name: NormalExit
    exit_status: 0
  - name: TargetFileMissingError
    exit_status: 4
    prefix_name: true
    prefix_error: true
    message: |
      Please ensure the target file {!r}
      exists.
  - name: ConfigUnreadable
    exit_status: 5
    message: "Cannot open {self.path}."
  - name: BarAbort
    extends: UserAbort
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self::with_catalog(CATALOG)
    }

    fn with_catalog(yaml: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("userexit.yaml"), yaml).unwrap();
        Self { dir }
    }

    fn catalog(&self) -> PathBuf {
        self.dir.path().join("userexit.yaml")
    }

    fn run(&self, args: &[&str]) -> Output {
        userexit(self.dir.path(), args)
    }
}

fn userexit(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_userexit"))
        .current_dir(dir)
        .args(args)
        .env_remove("USEREXIT_CATALOG")
        .env_remove("USEREXIT_LOG")
        .env_remove("USEREXIT_WIDTH")
        .output()
        .unwrap_or_else(|e| panic!("failed to execute userexit {}: {}", args.join(" "), e))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn raise_writes_message_to_stderr_and_exits_with_status() {
    let fixture = Fixture::new();
    let output = fixture.run(&["raise", "BadInputError", "color", "red"]);

    assert_eq!(output.status.code(), Some(3));
    assert_eq!(stderr(&output), "Input color should be set to red.\n");
    assert!(output.stdout.is_empty());
}

#[test]
fn raise_silent_variant_prints_nothing() {
    let fixture = Fixture::new();
    let output = fixture.run(&["raise", "NormalExit"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stderr.is_empty());
    assert!(output.stdout.is_empty());
}

#[test]
fn raise_uses_catalog_program_name_in_prefix() {
    let fixture = Fixture::new();
    let output = fixture.run(&["raise", "TargetFileMissingError", "a.txt"]);

    assert_eq!(output.status.code(), Some(4));
    assert_eq!(
        stderr(&output),
        "deploy: error: Please ensure the target file \"a.txt\" exists.\n"
    );
}

#[test]
fn raise_program_flag_overrides_catalog() {
    let fixture = Fixture::new();
    let output = fixture.run(&["raise", "--program", "ship", "TargetFileMissingError", "a.txt"]);

    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).starts_with("ship: error: "));
}

#[test]
fn raise_passes_fields() {
    let fixture = Fixture::new();
    let output = fixture.run(&["raise", "--field", "path=/etc/app.conf", "ConfigUnreadable"]);

    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stderr(&output), "Cannot open /etc/app.conf.\n");
}

#[test]
fn raise_uses_assigned_status() {
    let fixture = Fixture::new();
    let output = fixture.run(&["raise", "BarAbort"]);

    assert_eq!(output.status.code(), Some(79));
    assert!(output.stderr.is_empty());
}

#[test]
fn raise_builtin_abort() {
    let fixture = Fixture::new();
    let output = fixture.run(&["raise", "--program", "deploy", "UserAbort"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "deploy: Execution aborted with an error.\n");
}

#[test]
fn catalog_path_from_env() {
    let fixture = Fixture::new();
    let elsewhere = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_userexit"))
        .current_dir(elsewhere.path())
        .args(["raise", "BadInputError", "a", "b"])
        .env("USEREXIT_CATALOG", fixture.catalog())
        .env_remove("USEREXIT_LOG")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn unknown_variant_is_a_usage_error() {
    let fixture = Fixture::new();
    let output = fixture.run(&["raise", "Nope"]);

    assert_eq!(output.status.code(), Some(64));
    let err = stderr(&output);
    assert!(err.starts_with("userexit: error: No variant named \"Nope\""), "{err}");
}

#[test]
fn missing_arguments_are_a_usage_error() {
    let fixture = Fixture::new();
    let output = fixture.run(&["raise", "BadInputError", "color"]);

    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).starts_with("userexit: error: Cannot render variant"));
}

#[test]
fn missing_catalog_is_no_input() {
    let dir = TempDir::new().unwrap();
    let output = userexit(dir.path(), &["raise", "BadInputError"]);

    assert_eq!(output.status.code(), Some(66));
    assert!(stderr(&output).starts_with("userexit: error: Cannot read catalog"));
}

#[test]
fn invalid_catalog_is_a_data_error() {
    let fixture = Fixture::with_catalog("variants:\n  - name: A\n  - name: A\n");
    let output = fixture.run(&["check"]);

    assert_eq!(output.status.code(), Some(65));
    assert!(stderr(&output).contains("declared more than once"));
    assert!(output.stdout.is_empty());
}

#[test]
fn check_reports_summary() {
    let fixture = Fixture::new();
    let output = fixture.run(&["check"]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("is valid."), "{out}");
    assert!(out.contains("Variants: 5"), "{out}");
    assert!(out.contains("Program:  deploy"), "{out}");
}

#[test]
fn check_warns_about_shell_statuses() {
    let fixture =
        Fixture::with_catalog("variants:\n  - name: NotFound\n    exit_status: 127\n");
    let output = fixture.run(&["check"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("NotFound exits with 127"));
}

#[test]
fn list_prints_table() {
    let fixture = Fixture::new();
    let output = fixture.run(&["list"]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("STATUS"));
    assert!(lines.iter().any(|line| line.contains("BadInputError")
        && line.contains("Input {} should be set to {}.")));
    assert!(lines.iter().any(|line| line.trim_start().starts_with("79")
        && line.contains("BarAbort")));
}

#[test]
fn list_json_is_machine_readable() {
    let fixture = Fixture::new();
    let output = fixture.run(&["list", "--json"]);

    assert_eq!(output.status.code(), Some(0));
    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 7);
    assert_eq!(entries[0]["name"], "UserExit");
    assert_eq!(entries[6]["name"], "BarAbort");
    assert_eq!(entries[6]["exit_status"], 79);
}
