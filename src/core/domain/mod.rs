//! Domain types.

mod key;
mod message;
mod tier;

pub use key::{age_in_days, AccessKeyRecord, KeyStatus};
pub use message::NotificationMessage;
pub use tier::AgeTier;
