//! Command-line interface.

pub mod check;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::core::check::Summary;
use crate::core::config::{FileConfig, Overrides, Settings};
use crate::error::Result;

/// keywatch - report stale AWS IAM access keys.
#[derive(Parser)]
#[command(
    name = "keywatch",
    about = "Report stale AWS IAM access keys and email their owners",
    version,
    after_help = "Without --send, key ages are only reported."
)]
pub struct Cli {
    /// IAM user whose access keys are checked
    #[arg(long, env = "KEYWATCH_USER")]
    pub user: Option<String>,

    /// Email From address [default: you@example.com]
    #[arg(long, env = "KEYWATCH_SENDER")]
    pub sender: Option<String>,

    /// Email recipient [default: you@example.com]
    #[arg(long, env = "KEYWATCH_RCPT")]
    pub rcpt: Option<String>,

    /// SMTP relay host [default: smtp.gmail.com]
    #[arg(long = "smtpServer", env = "KEYWATCH_SMTP_SERVER")]
    pub smtp_server: Option<String>,

    /// SMTP relay port [default: 587]
    #[arg(long = "smtpPort", env = "KEYWATCH_SMTP_PORT")]
    pub smtp_port: Option<u16>,

    /// SMTP password
    #[arg(long = "smtpPassword", env = "KEYWATCH_SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Send notification emails for stale keys
    #[arg(long)]
    pub send: bool,

    /// IAM region [default: us-east-1]
    #[arg(long, env = "KEYWATCH_REGION")]
    pub region: Option<String>,

    /// Accept any relay certificate (testing only)
    #[arg(long)]
    pub insecure_skip_verify: bool,

    /// Network timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file [default: <config dir>/keywatch/config.toml]
    #[arg(long, env = "KEYWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn overrides(self) -> Overrides {
        Overrides {
            user: self.user,
            sender: self.sender,
            rcpt: self.rcpt,
            smtp_server: self.smtp_server,
            smtp_port: self.smtp_port,
            smtp_password: self.smtp_password.map(Zeroizing::new),
            send: self.send,
            region: self.region,
            insecure_skip_verify: self.insecure_skip_verify,
            timeout_secs: self.timeout,
        }
    }
}

/// Resolve settings and run the check.
pub fn execute(cli: Cli) -> Result<Summary> {
    let file = FileConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(cli.overrides(), file)?;
    check::execute(&settings)
}
