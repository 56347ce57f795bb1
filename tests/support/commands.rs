//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a keywatch command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and XDG_CONFIG_HOME inside the temporary home
    /// - no KEYWATCH_* variables from the calling shell
    /// - colors disabled
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("keywatch").expect("failed to find keywatch binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("NO_COLOR", "1");
        for var in [
            "KEYWATCH_USER",
            "KEYWATCH_SENDER",
            "KEYWATCH_RCPT",
            "KEYWATCH_SMTP_SERVER",
            "KEYWATCH_SMTP_PORT",
            "KEYWATCH_SMTP_PASSWORD",
            "KEYWATCH_REGION",
            "KEYWATCH_CONFIG",
            "KEYWATCH_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Run keywatch with the given arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run keywatch")
    }
}
