//! CLI smoke tests.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn promptminer() -> Command {
    Command::cargo_bin("promptminer").expect("binary built")
}

#[test]
fn help_lists_subcommands() {
    promptminer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn check_config_accepts_a_valid_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[miner]
model = "gpt-4o-mini"

[logging]
level = "info"
format = "pretty"
"#
    )
    .unwrap();

    promptminer()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("gpt-4o-mini"));
}

#[test]
fn check_config_rejects_an_invalid_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[miner]
temperature = 9.0
"#
    )
    .unwrap();

    promptminer()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("temperature"));
}

#[test]
fn ask_fails_fast_without_an_api_key() {
    promptminer()
        .env_remove("OPENAI_API_KEY")
        .args(["ask", "hello", "--config", "/nonexistent/promptminer.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}
