//! AWS IAM inventory backend.
//!
//! Lists a user's access keys with `iam:ListAccessKeys`.
//!
//! Credentials come from the `[aws]` section of the config file when given,
//! otherwise from the default provider chain (environment, profile,
//! instance role).

use std::fmt;
use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_iam::config::Credentials;
use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::types::AccessKeyMetadata;
use chrono::{DateTime, Utc};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::KeyInventory;
use crate::core::constants::{DEFAULT_REGION, DEFAULT_TIMEOUT_SECS, MAX_KEYS};
use crate::core::domain::{AccessKeyRecord, KeyStatus};
use crate::error::{Result, ServiceError};

/// Explicit AWS credentials.
#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: Zeroizing<String>,
    pub session_token: Option<Zeroizing<String>>,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// IAM-backed inventory.
#[derive(Debug, Clone)]
pub struct IamInventory {
    region: String,
    credentials: Option<AwsCredentials>,
    max_keys: i32,
    timeout: Duration,
}

impl Default for IamInventory {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl IamInventory {
    /// Create an inventory for `region` using ambient credentials.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            credentials: None,
            max_keys: MAX_KEYS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Use explicit credentials instead of the default provider chain.
    pub fn with_credentials(mut self, credentials: Option<AwsCredentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Cap on the number of keys requested.
    pub fn with_max_keys(mut self, max_keys: i32) -> Self {
        self.max_keys = max_keys;
        self
    }

    /// Operation timeout for the IAM call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl KeyInventory for IamInventory {
    fn list_access_keys(&self, user: &str) -> Result<Vec<AccessKeyRecord>> {
        debug!(
            user,
            region = %self.region,
            max_keys = self.max_keys,
            explicit_creds = self.credentials.is_some(),
            "listing access keys"
        );

        // The SDK is async; the rest of the tool is not
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ServiceError::Runtime(e.to_string()))?;

        let output = rt.block_on(async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(self.region.clone()))
                .timeout_config(
                    TimeoutConfig::builder()
                        .operation_timeout(self.timeout)
                        .build(),
                );

            if let Some(creds) = &self.credentials {
                loader = loader.credentials_provider(Credentials::new(
                    creds.access_key_id.clone(),
                    creds.secret_access_key.as_str(),
                    creds.session_token.as_ref().map(|t| t.to_string()),
                    None,
                    "keywatch-config",
                ));
            }

            let config = loader.load().await;
            let client = aws_sdk_iam::Client::new(&config);

            client
                .list_access_keys()
                .user_name(user)
                .max_items(self.max_keys)
                .send()
                .await
                .map_err(|e| ServiceError::ListKeys {
                    user: user.to_string(),
                    reason: DisplayErrorContext(&e).to_string(),
                })
        })?;

        let records = output
            .access_key_metadata()
            .iter()
            .map(to_record)
            .collect::<Result<Vec<_>>>()?;

        trace!(user, count = records.len(), "listed access keys");
        Ok(records)
    }
}

/// Convert IAM metadata into a key record.
fn to_record(meta: &AccessKeyMetadata) -> Result<AccessKeyRecord> {
    let key_id = meta
        .access_key_id()
        .ok_or_else(|| ServiceError::Malformed("access key without id".into()))?;

    let created = meta
        .create_date()
        .and_then(|d| DateTime::<Utc>::from_timestamp(d.secs(), d.subsec_nanos()));

    Ok(AccessKeyRecord {
        key_id: key_id.to_string(),
        created,
        status: meta
            .status()
            .map(|s| KeyStatus::parse(s.as_str()))
            .unwrap_or(KeyStatus::Unknown),
    })
}
