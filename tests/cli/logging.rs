//! Logging and verbosity tests.
//!
//! Log lines go to stderr; debug output only appears when asked for.

use crate::support::*;

#[test]
fn test_default_no_debug_output() {
    let t = Test::new();
    let path = t.config(FULL_CONFIG);

    let output = t.run(&["--config", path.to_str().unwrap(), "--timeout", "0"]);
    assert_exit_code(&output, 2);

    let err = stderr(&output);
    assert!(
        !err.contains("DEBUG") && !err.contains("loading config file"),
        "default mode should not show debug output: {}",
        err
    );
}

#[test]
fn test_verbose_flag_shows_debug_output() {
    let t = Test::new();
    let path = t.config(FULL_CONFIG);

    let output = t.run(&["--verbose", "--config", path.to_str().unwrap(), "--timeout", "0"]);
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "loading config file");
}

#[test]
fn test_log_env_var() {
    let t = Test::new();
    let path = t.config(FULL_CONFIG);

    let output = t
        .cmd()
        .env("KEYWATCH_LOG", "keywatch=debug")
        .args(["--config", path.to_str().unwrap(), "--timeout", "0"])
        .output()
        .unwrap();
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "loading config file");
}
