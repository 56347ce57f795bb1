//! Access key record.
//!
//! Metadata about one IAM access key, as reported by the identity service.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::ValidationError;

/// Whether IAM currently accepts the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Active,
    Inactive,
    Unknown,
}

impl KeyStatus {
    /// Parse the status string IAM returns.
    pub fn parse(s: &str) -> Self {
        match s {
            "Active" => Self::Active,
            "Inactive" => Self::Inactive,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One access key of the inspected user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKeyRecord {
    /// IAM access key id (e.g. `AKIA...`)
    pub key_id: String,
    /// When IAM created the key, if it said so
    pub created: Option<DateTime<Utc>>,
    pub status: KeyStatus,
}

impl AccessKeyRecord {
    /// Create an active key record with a known creation time.
    pub fn new(key_id: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            key_id: key_id.into(),
            created: Some(created),
            status: KeyStatus::Active,
        }
    }

    /// Time elapsed since the key was created.
    ///
    /// A creation time in the future counts as zero. A missing or zero
    /// (Unix epoch) creation time is rejected.
    pub fn age(&self, now: DateTime<Utc>) -> Result<TimeDelta, ValidationError> {
        let created = self
            .created
            .filter(|c| c.timestamp() != 0)
            .ok_or_else(|| ValidationError::MissingCreationDate {
                key_id: self.key_id.clone(),
            })?;

        Ok((now - created).max(TimeDelta::zero()))
    }
}

/// Age expressed in fractional days, for display.
pub fn age_in_days(age: TimeDelta) -> f64 {
    age.num_seconds() as f64 / 86_400.0
}
