//! Notification delivery.
//!
//! Messages are handed to a mail relay over SMTP submission: connect,
//! STARTTLS, `AUTH PLAIN`, one sender, one recipient, the payload, `QUIT`.
//! Any failed step ends the attempt; there is no retry.
//!
//! ## Certificate verification
//!
//! [`TlsMode::Verified`] (the default) checks the relay certificate against
//! the webpki root store. [`TlsMode::Insecure`] accepts any certificate and
//! only exists for relays that cannot present a valid one.

mod relay;

pub use relay::{tls_parameters, RelayConnector, RelaySession};

use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::constants::{DEFAULT_SMTP_PORT, DEFAULT_SMTP_SERVER, DEFAULT_TIMEOUT_SECS};
use crate::core::domain::NotificationMessage;
use crate::error::{ConfigError, DeliveryError, Result};

/// An open session with a mail relay, one call per submission step.
///
/// Each call reports its own step on failure.
pub trait Session {
    /// Switch to TLS and greet the relay again.
    fn start_tls(&mut self) -> std::result::Result<(), DeliveryError>;

    fn authenticate(&mut self, username: &str, password: &str) -> std::result::Result<(), DeliveryError>;

    fn mail_from(&mut self, sender: &str) -> std::result::Result<(), DeliveryError>;

    fn rcpt_to(&mut self, recipient: &str) -> std::result::Result<(), DeliveryError>;

    /// Send `DATA`, the payload and the terminating dot.
    fn data(&mut self, payload: &[u8]) -> std::result::Result<(), DeliveryError>;

    fn quit(&mut self) -> std::result::Result<(), DeliveryError>;
}

/// Opens sessions to a relay.
pub trait Connector {
    type Session: Session;

    fn connect(&self, config: &SmtpConfig) -> std::result::Result<Self::Session, DeliveryError>;
}

/// Delivers one message per call.
pub trait Notifier {
    /// Deliver `message`, returning the first step that failed.
    fn notify(&self, message: &NotificationMessage) -> std::result::Result<(), DeliveryError>;
}

/// Server certificate verification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    #[default]
    Verified,
    Insecure,
}

/// Mail relay settings.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Login name; the sender address when unset
    pub username: Option<String>,
    pub password: Zeroizing<String>,
    pub tls: TlsMode,
    pub timeout: Duration,
    /// Name announced in `EHLO`
    pub helo_name: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMTP_SERVER.to_string(),
            port: DEFAULT_SMTP_PORT,
            username: None,
            password: Zeroizing::new(String::new()),
            tls: TlsMode::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            helo_name: local_hostname(),
        }
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tls", &self.tls)
            .field("timeout", &self.timeout)
            .field("helo_name", &self.helo_name)
            .finish()
    }
}

/// Hostname for `EHLO`, falling back to `localhost`.
pub fn local_hostname() -> String {
    whoami::fallible::hostname()
        .ok()
        .filter(|h| !h.is_empty() && !h.contains(char::is_whitespace))
        .unwrap_or_else(|| "localhost".to_string())
}

/// Rewrite bare `\n` line endings as `\r\n`.
fn to_crlf(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for line in text.split_inclusive('\n') {
        match line.strip_suffix('\n') {
            Some(body) => {
                out.push_str(body.strip_suffix('\r').unwrap_or(body));
                out.push_str("\r\n");
            }
            None => out.push_str(line),
        }
    }
    out
}

/// SMTP-backed notifier.
pub struct SmtpNotifier<K: Connector = RelayConnector> {
    config: SmtpConfig,
    connector: K,
}

impl SmtpNotifier<RelayConnector> {
    /// Notifier that talks to the configured relay.
    pub fn new(config: SmtpConfig) -> Result<Self> {
        if config.tls == TlsMode::Insecure {
            warn!(
                host = %config.host,
                "relay certificate verification disabled"
            );
        }

        let connector = RelayConnector::new(&config.host, config.tls).map_err(|e| {
            ConfigError::Invalid {
                key: "tls",
                reason: e.to_string(),
            }
        })?;
        Ok(Self::with_connector(config, connector))
    }
}

impl<K: Connector> SmtpNotifier<K> {
    pub fn with_connector(config: SmtpConfig, connector: K) -> Self {
        Self { config, connector }
    }

    pub fn config(&self) -> &SmtpConfig {
        &self.config
    }
}

impl<K: Connector> Notifier for SmtpNotifier<K> {
    fn notify(&self, message: &NotificationMessage) -> std::result::Result<(), DeliveryError> {
        let cfg = &self.config;
        debug!(
            host = %cfg.host,
            port = cfg.port,
            recipient = message.recipient(),
            "delivering notification"
        );

        let mut session = self.connector.connect(cfg)?;
        session.start_tls()?;
        session.authenticate(
            cfg.username.as_deref().unwrap_or(message.sender()),
            &cfg.password,
        )?;
        session.mail_from(message.sender())?;
        session.rcpt_to(message.recipient())?;
        session.data(to_crlf(&message.render()).as_bytes())?;

        // The relay has accepted the message at this point
        if let Err(e) = session.quit() {
            warn!(error = %e, "relay did not close the session cleanly");
        }
        Ok(())
    }
}
