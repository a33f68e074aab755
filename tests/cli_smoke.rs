#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests run the binary against a throwaway config directory and
//! never reach a real provider.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const OFFLINE_CONFIG: &str = r#"
[sheet_tl]
provider = "offline"

[providers.offline]
endpoint = "http://127.0.0.1:9"
api_key = "unused"
"#;

/// A scratch config home and sheet file.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(config: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join("sheet-tl");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("config.toml"), config).unwrap();
        Self { dir }
    }

    fn sheet(&self, content: &str) -> String {
        let path = self.dir.path().join("words.csv");
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn read_sheet(&self) -> String {
        fs::read_to_string(self.dir.path().join("words.csv")).unwrap()
    }

    #[allow(deprecated)]
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sheet-tl").unwrap();
        cmd.env("XDG_CONFIG_HOME", self.dir.path())
            .env_remove("OPENAI_API_KEY")
            .env_remove("RUST_LOG")
            .arg("--no-color");
        cmd
    }
}

#[test]
fn test_help_displays_usage() {
    let ws = Workspace::new("");
    ws.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Translate a column"))
        .stdout(predicate::str::contains("--range"))
        .stdout(predicate::str::contains("--context"))
        .stdout(predicate::str::contains("--provider"));
}

#[test]
fn test_version_displays_version() {
    let ws = Workspace::new("");
    ws.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_providers_list_includes_builtin() {
    let ws = Workspace::new("");
    ws.cmd()
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("openai"))
        .stdout(predicate::str::contains("https://api.openai.com"));
}

#[test]
fn test_providers_list_marks_configured_default() {
    let ws = Workspace::new(OFFLINE_CONFIG);
    ws.cmd()
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("offline (default)"))
        .stdout(predicate::str::contains("openai"));
}

#[test]
fn test_providers_show_details() {
    let ws = Workspace::new(OFFLINE_CONFIG);
    ws.cmd()
        .args(["providers", "offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("endpoint    = http://127.0.0.1:9"))
        .stdout(predicate::str::contains("model       = gpt-4-turbo"))
        .stdout(predicate::str::contains("api_key     = (set)"));
}

#[test]
fn test_providers_show_nonexistent() {
    let ws = Workspace::new("");
    ws.cmd()
        .args(["providers", "nonexistent_provider_xyz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_missing_range_is_usage_error() {
    let ws = Workspace::new(OFFLINE_CONFIG);
    let sheet = ws.sheet("English,French\nHello\n");
    ws.cmd()
        .arg(&sheet)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--range"));
}

#[test]
fn test_context_flags_conflict() {
    let ws = Workspace::new(OFFLINE_CONFIG);
    let sheet = ws.sheet("English,French\nHello\n");
    ws.cmd()
        .args([&sheet, "--range", "A2", "--context", "--no-context"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_languages_fails_without_writing() {
    let ws = Workspace::new(OFFLINE_CONFIG);
    let content = ",\nHello\nWorld\n";
    let sheet = ws.sheet(content);
    ws.cmd()
        .args([&sheet, "--range", "A2:A3", "--no-context"])
        .assert()
        .code(65)
        .stderr(predicate::str::contains(
            "Please specify source language in A1 and target language in B1",
        ));
    assert_eq!(ws.read_sheet(), content);
}

#[test]
fn test_missing_languages_names_custom_cells() {
    let ws = Workspace::new(OFFLINE_CONFIG);
    let sheet = ws.sheet("English,French\nHello\n");
    ws.cmd()
        .args([
            &sheet,
            "--range",
            "A2",
            "--no-context",
            "--source-cell",
            "D1",
            "--target-cell",
            "E1",
        ])
        .assert()
        .code(65)
        .stderr(predicate::str::contains(
            "Please specify source language in D1 and target language in E1",
        ));
}

#[test]
fn test_multi_column_selection_fails_without_writing() {
    let ws = Workspace::new(OFFLINE_CONFIG);
    let content = "English,French\nHello,x\nWorld,y\n";
    let sheet = ws.sheet(content);
    ws.cmd()
        .args([&sheet, "--range", "A2:B3", "--no-context"])
        .assert()
        .code(65)
        .stderr(predicate::str::contains(
            "Please select a single column containing words to translate.",
        ));
    assert_eq!(ws.read_sheet(), content);
}

#[test]
fn test_invalid_range_is_rejected() {
    let ws = Workspace::new(OFFLINE_CONFIG);
    let sheet = ws.sheet("English,French\nHello\n");
    ws.cmd()
        .args([&sheet, "--range", "2C:C", "--no-context"])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Invalid range"));
}

#[test]
fn test_unknown_provider_is_config_error() {
    let ws = Workspace::new(OFFLINE_CONFIG);
    let sheet = ws.sheet("English,French\nHello\n");
    ws.cmd()
        .args([&sheet, "--range", "A2", "--no-context", "-p", "nope"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("Provider 'nope' not found"))
        .stderr(predicate::str::contains("offline"));
}

#[test]
fn test_unparsable_config_is_config_error() {
    let ws = Workspace::new("[sheet_tl\nprovider = ");
    let sheet = ws.sheet("English,French\nHello\n");
    ws.cmd()
        .args([&sheet, "--range", "A2", "--no-context"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_huge_range_is_clamped_to_data() {
    let ws = Workspace::new(OFFLINE_CONFIG);
    let sheet = ws.sheet("English,French\n\n\n");
    ws.cmd()
        .args([&sheet, "--range", "A2:A18446744073709551615", "--no-context"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Translated 0 of 0 words."));
}

#[test]
fn test_missing_api_key_is_config_error() {
    let ws = Workspace::new("");
    let sheet = ws.sheet("English,French\nHello\n");
    ws.cmd()
        .args([&sheet, "--range", "A2", "--no-context"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_missing_sheet_file_fails() {
    let ws = Workspace::new(OFFLINE_CONFIG);
    let missing = ws.dir.path().join("absent.csv");
    ws.cmd()
        .arg(&missing)
        .args(["--range", "A2", "--no-context"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absent.csv"));
}

#[test]
fn test_context_question_needs_terminal() {
    let ws = Workspace::new(OFFLINE_CONFIG);
    let sheet = ws.sheet("English,French\nHello\n");
    ws.cmd()
        .args([&sheet, "--range", "A2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--context or --no-context"));
}
