//! keywatch - report stale AWS IAM access keys.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── check         # Per-key report lines
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # Flag/file/default layering
//!     ├── domain/       # Key records, age tiers, messages
//!     ├── inventory/    # Access-key listing (IAM)
//!     ├── notify/       # SMTP submission
//!     └── check         # One pass over a user's keys
//! ```
//!
//! A run lists the user's keys, classifies each by age and, with `--send`,
//! emails one notice per key that is 85 days or older.

pub mod cli;
pub mod core;
pub mod error;
