//! Access-key inventory.
//!
//! Fetches the access keys of one IAM user. The real backend talks to IAM;
//! tests substitute [`StaticInventory`].

mod aws;

pub use aws::{AwsCredentials, IamInventory};

use crate::core::domain::AccessKeyRecord;
use crate::error::Result;

/// Source of access-key metadata.
pub trait KeyInventory {
    /// List the access keys of `user`, in the order the service reports them.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the lookup fails for any reason (network,
    /// credentials, unknown user). No partial results are returned.
    fn list_access_keys(&self, user: &str) -> Result<Vec<AccessKeyRecord>>;
}

/// Fixed in-memory inventory.
#[derive(Debug, Default, Clone)]
pub struct StaticInventory {
    keys: Vec<AccessKeyRecord>,
}

impl StaticInventory {
    pub fn new(keys: Vec<AccessKeyRecord>) -> Self {
        Self { keys }
    }
}

impl KeyInventory for StaticInventory {
    fn list_access_keys(&self, _user: &str) -> Result<Vec<AccessKeyRecord>> {
        Ok(self.keys.clone())
    }
}
