//! Configuration.
//!
//! Settings come from three layers, highest precedence first: command line
//! (or its environment variables), the TOML config file, built-in defaults.
//!
//! ```toml
//! user = "deploy-bot"
//!
//! [smtp]
//! server = "smtp.example.com"
//! sender = "ops@example.com"
//! rcpt = "deploy-owner@example.com"
//! password = "..."
//!
//! [aws]
//! region = "eu-west-1"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::check::CheckOptions;
use crate::core::constants;
use crate::core::inventory::AwsCredentials;
use crate::core::notify::{local_hostname, SmtpConfig, TlsMode};
use crate::error::{ConfigError, Result};

/// Contents of the config file. Every field is optional.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub user: Option<String>,
    pub rotation_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_keys: Option<i32>,
    #[serde(default)]
    pub smtp: SmtpSection,
    #[serde(default)]
    pub aws: AwsSection,
}

/// `[smtp]` section.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmtpSection {
    pub server: Option<String>,
    pub port: Option<u16>,
    pub sender: Option<String>,
    pub rcpt: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub insecure_skip_verify: Option<bool>,
}

/// `[aws]` section.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsSection {
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

impl FileConfig {
    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if a file is there, otherwise an empty config is returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => path.to_path_buf(),
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        debug!(path = %path.display(), "loading config file");
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content, &path)
    }

    /// Parse config file content; `path` is only used in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }

    /// `<config dir>/keywatch/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_FILE))
    }
}

/// Values given on the command line or through the environment.
#[derive(Default)]
pub struct Overrides {
    pub user: Option<String>,
    pub sender: Option<String>,
    pub rcpt: Option<String>,
    pub smtp_server: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_password: Option<Zeroizing<String>>,
    pub send: bool,
    pub region: Option<String>,
    pub insecure_skip_verify: bool,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub user: String,
    pub sender: String,
    pub rcpt: String,
    pub send: bool,
    pub rotation_url: String,
    pub smtp: SmtpConfig,
    pub region: String,
    pub aws_credentials: Option<AwsCredentials>,
    pub max_keys: i32,
    pub timeout: Duration,
}

impl Settings {
    /// Merge overrides over the file over defaults, then validate.
    pub fn resolve(cli: Overrides, file: FileConfig) -> Result<Self> {
        let user = cli
            .user
            .or(file.user)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingUser)?;

        let sender = cli
            .sender
            .or(file.smtp.sender)
            .unwrap_or_else(|| constants::DEFAULT_ADDRESS.to_string());
        let rcpt = cli
            .rcpt
            .or(file.smtp.rcpt)
            .unwrap_or_else(|| constants::DEFAULT_ADDRESS.to_string());
        for (key, value) in [("sender", &sender), ("rcpt", &rcpt)] {
            if !is_bare_address(value) {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "must be a single bare address".to_string(),
                }
                .into());
            }
        }

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(constants::DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "timeout",
                reason: "must be at least one second".to_string(),
            }
            .into());
        }
        let timeout = Duration::from_secs(timeout_secs);

        let max_keys = file.max_keys.unwrap_or(constants::MAX_KEYS);
        if !(1..=1000).contains(&max_keys) {
            return Err(ConfigError::Invalid {
                key: "max_keys",
                reason: format!("{max_keys} is outside 1..=1000"),
            }
            .into());
        }

        let port = cli
            .smtp_port
            .or(file.smtp.port)
            .unwrap_or(constants::DEFAULT_SMTP_PORT);
        if port == 0 {
            return Err(ConfigError::Invalid {
                key: "smtpPort",
                reason: "port 0 is not usable".to_string(),
            }
            .into());
        }

        let insecure = cli.insecure_skip_verify || file.smtp.insecure_skip_verify.unwrap_or(false);
        let smtp = SmtpConfig {
            host: cli
                .smtp_server
                .or(file.smtp.server)
                .unwrap_or_else(|| constants::DEFAULT_SMTP_SERVER.to_string()),
            port,
            username: file.smtp.username,
            password: cli
                .smtp_password
                .or_else(|| file.smtp.password.map(Zeroizing::new))
                .unwrap_or_else(|| Zeroizing::new(String::new())),
            tls: if insecure {
                TlsMode::Insecure
            } else {
                TlsMode::Verified
            },
            timeout,
            helo_name: local_hostname(),
        };

        let aws_credentials = match (file.aws.access_key_id, file.aws.secret_access_key) {
            (Some(access_key_id), Some(secret)) => Some(AwsCredentials {
                access_key_id,
                secret_access_key: Zeroizing::new(secret),
                session_token: file.aws.session_token.map(Zeroizing::new),
            }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "aws",
                    reason: "access_key_id and secret_access_key must be set together"
                        .to_string(),
                }
                .into());
            }
        };

        Ok(Self {
            user,
            sender,
            rcpt,
            send: cli.send,
            rotation_url: file
                .rotation_url
                .unwrap_or_else(|| constants::ROTATION_SCRIPT_URL.to_string()),
            smtp,
            region: cli
                .region
                .or(file.aws.region)
                .unwrap_or_else(|| constants::DEFAULT_REGION.to_string()),
            aws_credentials,
            max_keys,
            timeout,
        })
    }

    /// Options for the key check.
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            sender: self.sender.clone(),
            recipient: self.rcpt.clone(),
            rotation_url: self.rotation_url.clone(),
        }
    }
}

/// Non-empty, with no whitespace, line breaks or angle brackets.
fn is_bare_address(value: &str) -> bool {
    !value.is_empty() && !value.contains(|c: char| c.is_whitespace() || c == '<' || c == '>')
}
