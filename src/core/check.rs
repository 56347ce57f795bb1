//! Key age check.
//!
//! One pass over a user's access keys: classify each key and, when a
//! notifier is given, mail a notice for every key that is not fresh. Keys
//! are handled strictly one after another.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info};

use crate::core::domain::{AccessKeyRecord, AgeTier, NotificationMessage};
use crate::core::inventory::KeyInventory;
use crate::core::notify::Notifier;
use crate::error::{DeliveryError, Result, ValidationError};

/// What to do with stale keys.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub sender: String,
    pub recipient: String,
    pub rotation_url: String,
}

/// Why a key produced no email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Fresh,
    SendDisabled,
}

/// Result of handling one key.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Skipped(SkipReason),
    Sent,
    Failed(DeliveryError),
    Invalid(ValidationError),
}

/// Report for one key, handed to the caller as soon as the key is done.
#[derive(Debug, Clone)]
pub struct KeyReport {
    pub key: AccessKeyRecord,
    /// Absent when the record could not be aged
    pub age: Option<TimeDelta>,
    pub tier: Option<AgeTier>,
    pub outcome: Outcome,
}

/// Counts over a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub keys: usize,
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
    pub invalid: usize,
}

impl Summary {
    fn record(&mut self, outcome: &Outcome) {
        self.keys += 1;
        match outcome {
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Sent => self.sent += 1,
            Outcome::Failed(_) => self.failed += 1,
            Outcome::Invalid(_) => self.invalid += 1,
        }
    }

    /// Exit code for a run that got as far as listing the keys.
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            DeliveryError::EXIT_CODE
        } else if self.invalid > 0 {
            ValidationError::EXIT_CODE
        } else {
            0
        }
    }
}

/// Runs the check against an inventory and a notifier.
pub struct Checker<'a, I: KeyInventory + ?Sized, N: Notifier + ?Sized> {
    inventory: &'a I,
    /// Without one nothing is sent
    notifier: Option<&'a N>,
    options: CheckOptions,
}

impl<'a, I: KeyInventory + ?Sized, N: Notifier + ?Sized> Checker<'a, I, N> {
    pub fn new(inventory: &'a I, notifier: Option<&'a N>, options: CheckOptions) -> Self {
        Self {
            inventory,
            notifier,
            options,
        }
    }

    /// Check every key of `user` as of `now`.
    ///
    /// `on_report` is called once per key, in inventory order, before the
    /// next key is looked at.
    ///
    /// # Errors
    ///
    /// Only a failed inventory lookup aborts the run. Delivery and
    /// validation failures are reported per key.
    pub fn run(
        &self,
        user: &str,
        now: DateTime<Utc>,
        mut on_report: impl FnMut(&KeyReport),
    ) -> Result<Summary> {
        let keys = self.inventory.list_access_keys(user)?;
        debug!(
            user,
            count = keys.len(),
            send = self.notifier.is_some(),
            "checking keys"
        );

        let mut summary = Summary::default();
        for key in keys {
            let report = self.check_key(key, now);
            summary.record(&report.outcome);
            on_report(&report);
        }

        info!(
            user,
            keys = summary.keys,
            sent = summary.sent,
            failed = summary.failed,
            "check finished"
        );
        Ok(summary)
    }

    fn check_key(&self, key: AccessKeyRecord, now: DateTime<Utc>) -> KeyReport {
        let age = match key.age(now) {
            Ok(age) => age,
            Err(e) => {
                debug!(key_id = %key.key_id, error = %e, "unusable key record");
                return KeyReport {
                    key,
                    age: None,
                    tier: None,
                    outcome: Outcome::Invalid(e),
                };
            }
        };

        let tier = AgeTier::for_age(age);
        debug!(key_id = %key.key_id, hours = age.num_hours(), %tier, "classified key");

        let outcome = match self.notifier {
            _ if !tier.needs_notice() => Outcome::Skipped(SkipReason::Fresh),
            None => Outcome::Skipped(SkipReason::SendDisabled),
            Some(notifier) => self.notify(notifier, tier),
        };

        KeyReport {
            key,
            age: Some(age),
            tier: Some(tier),
            outcome,
        }
    }

    fn notify(&self, notifier: &N, tier: AgeTier) -> Outcome {
        let opts = &self.options;
        let message = match NotificationMessage::for_tier(
            tier,
            &opts.sender,
            &opts.recipient,
            &opts.rotation_url,
        ) {
            Ok(Some(message)) => message,
            Ok(None) => return Outcome::Skipped(SkipReason::Fresh),
            Err(e) => return Outcome::Invalid(e),
        };

        match notifier.notify(&message) {
            Ok(()) => Outcome::Sent,
            Err(e) => Outcome::Failed(e),
        }
    }
}
