#![allow(clippy::unwrap_used)]
//! End-to-end runs of the binary against a mock provider.

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use sheet_tl::sheet::{CellRef, Sheet};
use sheet_tl::translation::build_system_prompt;

struct Run {
    dir: TempDir,
    server: MockServer,
}

impl Run {
    fn new(sheet: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let server = MockServer::start();

        let config_dir = dir.path().join("sheet-tl");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            format!(
                "[sheet_tl]\nprovider = \"mock\"\ndelay_ms = 0\n\n\
                 [providers.mock]\nendpoint = \"{}\"\napi_key = \"test-key\"\n",
                server.base_url()
            ),
        )
        .unwrap();
        fs::write(dir.path().join("words.csv"), sheet).unwrap();

        Self { dir, server }
    }

    fn sheet_path(&self) -> PathBuf {
        self.dir.path().join("words.csv")
    }

    fn cell(&self, a1: &str) -> String {
        let sheet = Sheet::load(&self.sheet_path()).unwrap();
        sheet.get(a1.parse::<CellRef>().unwrap()).to_string()
    }

    /// Answers `word` (with optional `context`) with `reply`.
    fn reply(&self, word: &str, context: &str, reply: &str) -> httpmock::Mock<'_> {
        let body = request_body(word, context);
        let reply = reply.to_string();
        self.server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body(body);
            then.status(200).json_body(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": reply}}]
            }));
        })
    }

    #[allow(deprecated)]
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sheet-tl").unwrap();
        cmd.env("XDG_CONFIG_HOME", self.dir.path())
            .env_remove("RUST_LOG")
            .arg("--no-color")
            .arg(self.sheet_path());
        cmd
    }
}

fn request_body(word: &str, context: &str) -> Value {
    json!({
        "model": "gpt-4-turbo",
        "messages": [
            {"role": "system", "content": build_system_prompt("English", "French", context)},
            {"role": "user", "content": word}
        ],
        "temperature": 0.5,
        "max_tokens": 50
    })
}

#[test]
fn test_blank_rows_are_skipped() {
    let run = Run::new("English,French\nHello\n\nWorld\n");
    let hello = run.reply("Hello", "", "Bonjour");
    let world = run.reply("World", "", "Monde");

    run.cmd()
        .args(["--range", "A2:A4", "--no-context"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Translation complete! Translated 2 of 2 words.",
        ));

    hello.assert();
    world.assert();
    assert_eq!(run.cell("B2"), "Bonjour");
    assert_eq!(run.cell("B3"), "");
    assert_eq!(run.cell("B4"), "Monde");
    assert_eq!(run.cell("A3"), "");
}

#[test]
fn test_context_column_shifts_output() {
    let run = Run::new("English,French\nHello,greeting\nBank,river\n");
    let hello = run.reply("Hello", "greeting", "Salut");
    let bank = run.reply("Bank", "river", "Rive");

    run.cmd()
        .args(["--range", "A2:A3", "--context"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Translated 2 of 2 words."));

    hello.assert();
    bank.assert();
    assert_eq!(run.cell("B2"), "greeting");
    assert_eq!(run.cell("C2"), "Salut");
    assert_eq!(run.cell("C3"), "Rive");
}

#[test]
fn test_failed_row_gets_error_marker_and_run_continues() {
    let run = Run::new("English,French\nHello\nWorld\n");
    let failing = run.server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .json_body(request_body("Hello", ""));
        then.status(429).json_body(json!({
            "error": {"message": "Rate limit reached for requests", "code": "rate_limit_exceeded"}
        }));
    });
    let world = run.reply("World", "", "Monde");

    run.cmd()
        .args(["--range", "A2:A3", "--no-context"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Translation complete! Translated 1 of 2 words.",
        ))
        .stderr(predicate::str::contains("1 row failed"));

    failing.assert();
    world.assert();
    assert_eq!(
        run.cell("B2"),
        "ERROR: API Error: Rate limit reached for requests"
    );
    assert_eq!(run.cell("B3"), "Monde");
}

#[test]
fn test_existing_output_is_overwritten() {
    let run = Run::new("English,French\nHello,old\n");
    run.reply("Hello", "", "Bonjour");

    run.cmd()
        .args(["--range", "A2", "--no-context"])
        .assert()
        .success()
        .stderr(predicate::str::contains("will be overwritten"));

    assert_eq!(run.cell("B2"), "Bonjour");
}

#[test]
fn test_all_blank_selection_sends_nothing() {
    let content = "English,French\n\n\n";
    let run = Run::new(content);
    let any = run.server.mock(|when, then| {
        when.method(POST);
        then.status(500);
    });

    run.cmd()
        .args(["--range", "A2:A3", "--no-context"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Translated 0 of 0 words."));

    any.assert_hits(0);
}

#[test]
fn test_quiet_keeps_report_on_stdout() {
    let run = Run::new("English,French\nHello\n");
    run.reply("Hello", "", "Bonjour");

    run.cmd()
        .args(["--range", "A2", "--no-context", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Translated 1 of 1 words."))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_rerun_overwrites_with_fresh_translations() {
    let run = Run::new("English,French\nHello\n");
    let hello = run.reply("Hello", "", "Bonjour");

    for _ in 0..2 {
        run.cmd()
            .args(["--range", "A2", "--no-context"])
            .assert()
            .success();
    }

    hello.assert_hits(2);
    assert_eq!(run.cell("B2"), "Bonjour");
}
