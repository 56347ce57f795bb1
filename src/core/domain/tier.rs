//! Age tiers.
//!
//! Keys get a lead notice five days before the 90-day rotation deadline.

use chrono::{DateTime, TimeDelta, Utc};

use super::AccessKeyRecord;
use crate::core::constants::{
    EXPIRED_AGE_HOURS, EXPIRED_SUBJECT, WARNING_AGE_HOURS, WARNING_SUBJECT,
};
use crate::error::ValidationError;

/// Staleness classification of an access key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AgeTier {
    /// Younger than 85 days.
    Fresh,
    /// At least 85 days, younger than 90.
    Warning,
    /// At least 90 days.
    Expired,
}

impl AgeTier {
    /// Tier for an elapsed duration. Both lower bounds are inclusive.
    pub fn for_age(age: TimeDelta) -> Self {
        if age >= TimeDelta::hours(EXPIRED_AGE_HOURS) {
            Self::Expired
        } else if age >= TimeDelta::hours(WARNING_AGE_HOURS) {
            Self::Warning
        } else {
            Self::Fresh
        }
    }

    /// Classify a key record at `now`.
    pub fn classify(
        record: &AccessKeyRecord,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        record.age(now).map(Self::for_age)
    }

    /// Whether this tier warrants an email.
    pub fn needs_notice(&self) -> bool {
        !matches!(self, Self::Fresh)
    }

    /// Email subject for tiers that warrant one.
    pub fn subject(&self) -> Option<&'static str> {
        match self {
            Self::Fresh => None,
            Self::Warning => Some(WARNING_SUBJECT),
            Self::Expired => Some(EXPIRED_SUBJECT),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Warning => "warning",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for AgeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
