use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_succeeds() {
    Command::cargo_bin("devblog-views")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("view counts"));
}

#[test]
fn invalid_after_date_fails_before_any_fetch() {
    Command::cargo_bin("devblog-views")
        .unwrap()
        .args(["--after", "not-a-date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to parse date: not-a-date"));
}

#[test]
fn invalid_after_date_reports_json_error_in_json_mode() {
    Command::cargo_bin("devblog-views")
        .unwrap()
        .args(["--after", "not-a-date", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\""));
}
