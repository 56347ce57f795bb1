//! Tests for config file handling.

use crate::support::*;

#[test]
fn test_explicit_missing_config_fails() {
    let t = Test::new();
    let missing = t.home.path().join("nope.toml");

    let output = t.run(&["--user", "alice", "--config", missing.to_str().unwrap()]);
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "config file not found");
}

#[test]
fn test_config_from_env_var() {
    let t = Test::new();
    let missing = t.home.path().join("nope.toml");

    let output = t
        .cmd()
        .env("KEYWATCH_CONFIG", &missing)
        .args(["--user", "alice"])
        .output()
        .unwrap();
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "config file not found");
}

#[test]
fn test_invalid_toml_fails() {
    let t = Test::new();
    let path = t.config("user = [unterminated");

    let output = t.run(&["--config", path.to_str().unwrap()]);
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "invalid config file");
}

#[test]
fn test_unknown_setting_fails() {
    let t = Test::new();
    let path = t.config("[smtp]\nhost = \"mx.example.com\"\n");

    let output = t.run(&["--user", "alice", "--config", path.to_str().unwrap()]);
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "host");
}

#[test]
fn test_half_aws_credentials_fail() {
    let t = Test::new();
    let path = t.config("user = \"alice\"\n[aws]\nsecret_access_key = \"s\"\n");

    let output = t.run(&["--config", path.to_str().unwrap()]);
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "access_key_id and secret_access_key");
}

#[test]
fn test_file_settings_are_validated_with_flags() {
    let t = Test::new();
    let path = t.config(FULL_CONFIG);

    // The file supplies the user; the flag makes the settings invalid
    let output = t.run(&["--config", path.to_str().unwrap(), "--timeout", "0"]);
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "timeout");
}
