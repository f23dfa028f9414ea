use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn tmconf() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("tmconf"))
}

const IMAP_JSON: &str = r#"{"ltm profile imap imap": {"activation-mode": "require"}}"#;

#[test]
fn parse_prints_object_json_by_default() {
    let expected = fs::read_to_string(fixture("fixtures/imap.tmconf.json")).expect("read expected");
    tmconf()
        .arg("parse")
        .arg(fixture("fixtures/imap.tmconf"))
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn parse_format_tabular() {
    tmconf()
        .arg("parse")
        .arg(fixture("fixtures/imap.tmconf"))
        .arg("--format")
        .arg("tabular")
        .assert()
        .success()
        .stdout("[[\"ltm profile imap\", \"imap\", {\"activation-mode\": \"require\"}]]\n");
}

#[test]
fn parse_format_jsonl() {
    tmconf()
        .arg("parse")
        .arg(fixture("fixtures/imap.tmconf"))
        .arg("--format")
        .arg("jsonl")
        .assert()
        .success()
        .stdout(
            "{\"path\": \"ltm profile imap\", \"name\": \"imap\", \"object\": {\"activation-mode\": \"require\"}}\n",
        );
}

#[test]
fn parse_reads_stdin_with_dash() {
    let text = fs::read_to_string(fixture("fixtures/imap.tmconf")).expect("read fixture");
    tmconf()
        .arg("parse")
        .arg("-")
        .write_stdin(text)
        .assert()
        .success()
        .stdout(format!("{IMAP_JSON}\n"));
}

#[test]
fn parse_rejects_empty_input() {
    tmconf()
        .arg("parse")
        .write_stdin("  \n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No file_path given or input is empty. Use -h|--help for help.",
        ));
}

#[test]
fn parse_sort_flag_orders_keys() {
    tmconf()
        .arg("parse")
        .arg("--sort")
        .write_stdin("ltm node /Common/b {\n    z 1\n    a 2\n}\nltm node /Common/a { }\n")
        .assert()
        .success()
        .stdout("{\"ltm node /Common/a\": {}, \"ltm node /Common/b\": {\"a\": \"2\", \"z\": \"1\"}}\n");
}

#[test]
fn parse_writes_output_file_without_trailing_newline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("imap.json");

    tmconf()
        .arg("parse")
        .arg(fixture("fixtures/imap.tmconf"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&out).expect("read output"), IMAP_JSON);
}

#[test]
fn parse_refuses_to_overwrite_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("imap.tmconf");
    fs::copy(fixture("fixtures/imap.tmconf"), &input).expect("copy fixture");
    let original = fs::read_to_string(&input).expect("read input");

    tmconf()
        .arg("parse")
        .arg(&input)
        .arg("--output")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite input file"));

    assert_eq!(fs::read_to_string(&input).expect("read input"), original);
}

#[test]
fn parse_uses_settings_file_format() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("settings.toml");
    fs::write(&config, "[output]\nformat = \"jsonl\"\n").expect("write settings");

    tmconf()
        .arg("parse")
        .arg(fixture("fixtures/imap.tmconf"))
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\"path\": \"ltm profile imap\""));

    tmconf()
        .arg("parse")
        .arg(fixture("fixtures/imap.tmconf"))
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("object")
        .assert()
        .success()
        .stdout(format!("{IMAP_JSON}\n"));
}

#[test]
fn parse_reports_bad_settings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("settings.toml");
    fs::write(&config, "[parse]\nsort = \"maybe\"\n").expect("write settings");

    tmconf()
        .arg("parse")
        .arg(fixture("fixtures/imap.tmconf"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load settings"));
}

#[test]
fn parse_logs_diagnostics_as_warnings() {
    tmconf()
        .arg("parse")
        .arg(fixture("fixtures/diagnostics.tmconf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"load-balancing-mode\": \"round-robin\""))
        .stderr(predicate::str::contains(
            "line outside of any object: 'stray text here'",
        ))
        .stderr(predicate::str::contains("unrecognized line for object"));
}

#[test]
fn parse_fails_on_unclosed_block() {
    tmconf()
        .arg("parse")
        .write_stdin("ltm pool /Common/p {\n    members none\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unclosed block starting at line 1"));
}
