//! Error types.
//!
//! Each concern gets its own enum; [`Error`] nests them so callers can match
//! on the class of failure (and `main` can map it to an exit code).

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for this class of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(_) => 1,
            Error::Config(_) => 2,
            Error::Service(_) => 3,
            Error::Validation(_) => ValidationError::EXIT_CODE,
            Error::Delivery(_) => DeliveryError::EXIT_CODE,
        }
    }
}

/// Configuration and usage errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no IAM user given")]
    MissingUser,

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Identity-service failures. Always fatal to the run.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("failed to start async runtime: {0}")]
    Runtime(String),

    #[error("unable to list access keys for {user}: {reason}")]
    ListKeys { user: String, reason: String },

    #[error("malformed IAM response: {0}")]
    Malformed(String),
}

/// Malformed input: a key record or a message that cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("access key {key_id} has no creation date")]
    MissingCreationDate { key_id: String },

    #[error("{field} must not contain line breaks")]
    HeaderInjection { field: &'static str },

    #[error("malformed message: {0}")]
    MalformedMessage(String),
}

impl ValidationError {
    pub const EXIT_CODE: i32 = 4;
}

/// A step of the mail-submission session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStep {
    Connect,
    Upgrade,
    Authenticate,
    Sender,
    Recipient,
    Data,
    Close,
    Quit,
}

impl fmt::Display for DeliveryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeliveryStep::Connect => "connect",
            DeliveryStep::Upgrade => "starttls",
            DeliveryStep::Authenticate => "authenticate",
            DeliveryStep::Sender => "declare sender",
            DeliveryStep::Recipient => "declare recipient",
            DeliveryStep::Data => "write body",
            DeliveryStep::Close => "close body",
            DeliveryStep::Quit => "quit",
        };
        f.write_str(name)
    }
}

/// A mail-submission step failed. Reported per key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{step} failed: {reason}")]
pub struct DeliveryError {
    pub step: DeliveryStep,
    pub reason: String,
}

impl DeliveryError {
    pub const EXIT_CODE: i32 = 5;

    pub fn new(step: DeliveryStep, reason: impl Into<String>) -> Self {
        Self {
            step,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
