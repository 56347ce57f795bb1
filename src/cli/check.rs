//! Check command - report key ages and send notices.

use chrono::Utc;
use tracing::warn;

use crate::cli::output;
use crate::core::check::{Checker, KeyReport, Outcome, SkipReason, Summary};
use crate::core::config::Settings;
use crate::core::domain::age_in_days;
use crate::core::inventory::IamInventory;
use crate::core::notify::SmtpNotifier;
use crate::error::Result;

/// Check the configured user's keys, printing one line per key.
pub fn execute(settings: &Settings) -> Result<Summary> {
    let inventory = IamInventory::new(&settings.region)
        .with_credentials(settings.aws_credentials.clone())
        .with_max_keys(settings.max_keys)
        .with_timeout(settings.timeout);
    let notifier = notifier(settings)?;
    let checker = Checker::new(&inventory, notifier.as_ref(), settings.check_options());

    output::header(&format!("Access keys for {}", settings.user));
    let summary = checker.run(&settings.user, Utc::now(), |report| {
        print_report(settings, report)
    })?;

    if summary.keys == 0 {
        output::dimmed(&format!("No access keys found for {}.", settings.user));
    } else {
        output::dimmed(&format!(
            "{} checked, {} sent, {} failed",
            plural(summary.keys, "key"),
            plural(summary.sent, "email"),
            summary.failed + summary.invalid
        ));
    }

    Ok(summary)
}

/// The relay is only set up when sending is enabled.
fn notifier(settings: &Settings) -> Result<Option<SmtpNotifier>> {
    if !settings.send {
        return Ok(None);
    }
    if settings.smtp.password.is_empty() {
        warn!("sending is enabled but no SMTP password is set");
    }
    SmtpNotifier::new(settings.smtp.clone()).map(Some)
}

fn print_report(settings: &Settings, report: &KeyReport) {
    let line = report_line(settings, report);
    match &report.outcome {
        Outcome::Skipped(SkipReason::Fresh) => output::dimmed(&line),
        Outcome::Skipped(SkipReason::SendDisabled) => output::warn(&line),
        Outcome::Sent => output::success(&line),
        Outcome::Failed(_) | Outcome::Invalid(_) => output::error(&line),
    }
}

fn report_line(settings: &Settings, report: &KeyReport) -> String {
    let key = output::key(&report.key.key_id);
    let days = report.age.map(age_in_days).unwrap_or_default();
    let tier = report.tier.map(|t| t.as_str()).unwrap_or("unknown");

    match &report.outcome {
        Outcome::Skipped(reason) => {
            let line = format!(
                "No email sent. {} IAM access key {} ({}) is {:.1} days old.",
                settings.user, key, report.key.status, days
            );
            match reason {
                SkipReason::Fresh => line,
                SkipReason::SendDisabled => format!("{line} [{tier}]"),
            }
        }
        Outcome::Sent => format!(
            "Success: sent email to {} about {} ({}, {:.1} days old)",
            settings.rcpt, key, tier, days
        ),
        Outcome::Failed(e) => format!("Error sending email about {}: {}", key, e),
        Outcome::Invalid(e) => format!("Skipped {}: {}", key, e),
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("1 {word}")
    } else {
        format!("{n} {word}s")
    }
}
