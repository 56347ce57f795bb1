//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_flags() {
    let t = Test::new();

    let output = t.run(&["--help"]);
    assert_success(&output);
    for flag in ["--user", "--sender", "--rcpt", "--smtpServer", "--smtpPort", "--smtpPassword", "--send"] {
        assert_stdout_contains(&output, flag);
    }
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("keywatch"));
}

#[test]
fn test_missing_user_is_usage_error() {
    let t = Test::new();

    let output = t.run(&["--send"]);
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "no IAM user given");
    assert_stderr_contains(&output, "pass --user");
}

#[test]
fn test_blank_user_is_usage_error() {
    let t = Test::new();

    let output = t.run(&["--user", "   "]);
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "no IAM user given");
}

#[test]
fn test_non_numeric_port_rejected() {
    let t = Test::new();

    t.cmd()
        .args(["--user", "alice", "--smtpPort", "smtp"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--smtpPort"));
}

#[test]
fn test_zero_timeout_rejected() {
    let t = Test::new();

    let output = t.run(&["--user", "alice", "--timeout", "0"]);
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "timeout");
}

#[test]
fn test_header_injection_in_recipient_rejected() {
    let t = Test::new();

    let output = t.run(&["--user", "alice", "--rcpt", "a@example.com\r\nBcc: b@example.com"]);
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "rcpt");
}

#[test]
fn test_password_never_echoed() {
    let t = Test::new();

    let output = t.run(&[
        "--user",
        "alice",
        "--smtpPassword",
        SECRET_PASSWORD,
        "--timeout",
        "0",
        "--verbose",
    ]);
    assert_exit_code(&output, 2);
    assert_output_excludes(&output, SECRET_PASSWORD);
}

#[test]
fn test_password_env_hidden_in_help() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("KEYWATCH_SMTP_PASSWORD", SECRET_PASSWORD)
        .arg("--help")
        .output()
        .unwrap();
    assert_success(&output);
    assert_output_excludes(&output, SECRET_PASSWORD);
}
