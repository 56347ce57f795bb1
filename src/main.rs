//! keywatch - report stale AWS IAM access keys.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keywatch::cli::output;
use keywatch::cli::{execute, Cli};
use keywatch::core::constants::LOG_ENV;
use keywatch::error::{ConfigError, Error, ServiceError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keywatch=debug")
        } else {
            EnvFilter::new("keywatch=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match execute(cli) {
        Ok(summary) => std::process::exit(summary.exit_code()),
        Err(e) => {
            let suggestion = match &e {
                Error::Config(ConfigError::MissingUser) => Some("pass --user <name>"),
                Error::Service(ServiceError::ListKeys { .. }) => {
                    Some("check AWS credentials and that the user exists")
                }
                _ => None,
            };

            output::error(&e.to_string());
            if let Some(hint) = suggestion {
                output::hint(hint);
            }
            std::process::exit(e.exit_code());
        }
    }
}
