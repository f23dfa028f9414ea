use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn files_are_reported_in_filename_order() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tmconf"));
    cmd.arg("files")
        .arg(fixture("fixtures/pop3.tmconf"))
        .arg(fixture("fixtures/imap.tmconf"))
        .assert()
        .success()
        .stdout(concat!(
            r#"[{"filename": "imap.tmconf", "output": {"ltm profile imap imap": {"activation-mode": "require"}}}, "#,
            r#"{"filename": "pop3.tmconf", "output": {"ltm profile pop3 pop3": {"activation-mode": "require"}}}]"#,
            "\n"
        ));
}

#[test]
fn files_fail_when_one_file_is_missing() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tmconf"));
    cmd.arg("files")
        .arg(fixture("fixtures/imap.tmconf"))
        .arg(fixture("fixtures/missing.tmconf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.tmconf"));
}

#[test]
fn files_requires_at_least_one_path() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tmconf"));
    cmd.arg("files").assert().failure();
}

#[test]
fn files_sort_flag_sorts_each_output() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tmconf"));
    let assert = cmd
        .arg("files")
        .arg("--sort")
        .arg(fixture("fixtures/sample.tmconf"))
        .arg(fixture("fixtures/diagnostics.tmconf"))
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains(
        r#""output": {"cli admin-partitions": {"update-partition": "Common"}, "gtm topology /Common/Shared/topology": {"records": {"longest-match-enabled": "yes", "topology_0""#
    ));

    let results: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is JSON");
    let results = results.as_array().expect("array of results");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["filename"], "diagnostics.tmconf");
    assert_eq!(results[1]["filename"], "sample.tmconf");
    assert_eq!(
        results[1]["output"]["ltm pool /Common/pool1"]["monitor min 1 of"],
        serde_json::json!(["/Common/http", "/Common/tcp"])
    );
}
