//! Constants used throughout keywatch.
//!
//! Centralizes thresholds, defaults and message text.

/// Age (in hours) from which a key is reported as nearing rotation (85 days).
pub const WARNING_AGE_HOURS: i64 = 2040;

/// Age (in hours) from which a key is overdue for rotation (90 days).
pub const EXPIRED_AGE_HOURS: i64 = 2160;

/// Maximum number of keys requested from IAM in one call.
pub const MAX_KEYS: i32 = 5;

/// IAM region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Mail relay used when none is configured.
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";

/// Mail submission port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Placeholder From/To address.
pub const DEFAULT_ADDRESS: &str = "you@example.com";

/// Network timeout in seconds for both IAM and SMTP.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Script linked from every notification.
pub const ROTATION_SCRIPT_URL: &str =
    "https://github.com/605data/aws_scripts/blob/master/aws-iam-rotate-keys.sh";

/// Config file name inside the user's config directory.
pub const CONFIG_FILE: &str = "keywatch/config.toml";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "KEYWATCH_LOG";

pub const EXPIRED_SUBJECT: &str = "Your IAM Access Keys are at least 90 days old.";
pub const WARNING_SUBJECT: &str = "Your IAM Access Keys are nearing 90 days old.";
