//! Test fixtures and constants.

/// Password used in tests that must never be echoed.
pub const SECRET_PASSWORD: &str = "correct-horse-battery-staple";

/// Config file with every section filled in.
pub const FULL_CONFIG: &str = r#"
user = "deploy-bot"
timeout_secs = 5

[smtp]
server = "mx.example.com"
port = 2525
sender = "ops@example.com"
rcpt = "owner@example.com"

[aws]
region = "eu-west-1"
"#;
