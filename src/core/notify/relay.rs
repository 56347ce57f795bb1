//! Relay sessions over lettre's SMTP client connection.

use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::{SmtpConnection, TlsParameters};
use lettre::transport::smtp::commands::{Data, Mail, Rcpt};
use lettre::transport::smtp::extension::ClientId;
use lettre::Address;
use tracing::debug;

use super::{Connector, Session, SmtpConfig, TlsMode};
use crate::error::{DeliveryError, DeliveryStep};

/// TLS parameters for `host`, skipping certificate checks in
/// [`TlsMode::Insecure`].
pub fn tls_parameters(host: &str, mode: TlsMode) -> Result<TlsParameters, lettre::transport::smtp::Error> {
    TlsParameters::builder(host.to_string())
        .dangerous_accept_invalid_certs(mode == TlsMode::Insecure)
        .build_rustls()
}

fn failed(step: DeliveryStep) -> impl Fn(lettre::transport::smtp::Error) -> DeliveryError {
    move |e| DeliveryError::new(step, e.to_string())
}

/// Opens plain-text submission connections that are upgraded with STARTTLS.
#[derive(Clone)]
pub struct RelayConnector {
    tls: TlsParameters,
}

impl RelayConnector {
    pub fn new(host: &str, mode: TlsMode) -> Result<Self, lettre::transport::smtp::Error> {
        Ok(Self {
            tls: tls_parameters(host, mode)?,
        })
    }
}

impl Connector for RelayConnector {
    type Session = RelaySession;

    fn connect(&self, config: &SmtpConfig) -> Result<RelaySession, DeliveryError> {
        let hello = ClientId::Domain(config.helo_name.clone());
        let conn = SmtpConnection::connect(
            (config.host.as_str(), config.port),
            Some(config.timeout),
            &hello,
            None,
            None,
        )
        .map_err(failed(DeliveryStep::Connect))?;

        debug!(host = %config.host, port = config.port, "connected to relay");
        Ok(RelaySession {
            conn,
            tls: self.tls.clone(),
            hello,
        })
    }
}

/// One submission session.
pub struct RelaySession {
    conn: SmtpConnection,
    tls: TlsParameters,
    hello: ClientId,
}

impl Session for RelaySession {
    fn start_tls(&mut self) -> Result<(), DeliveryError> {
        self.conn
            .starttls(&self.tls, &self.hello)
            .map_err(failed(DeliveryStep::Upgrade))?;
        debug!("relay session encrypted");
        Ok(())
    }

    fn authenticate(&mut self, username: &str, password: &str) -> Result<(), DeliveryError> {
        if !self.conn.is_encrypted() {
            return Err(DeliveryError::new(
                DeliveryStep::Authenticate,
                "refusing to send credentials over an unencrypted connection",
            ));
        }
        let credentials = Credentials::new(username.to_string(), password.to_string());
        self.conn
            .auth(&[Mechanism::Plain], &credentials)
            .map(drop)
            .map_err(failed(DeliveryStep::Authenticate))
    }

    fn mail_from(&mut self, sender: &str) -> Result<(), DeliveryError> {
        let address: Address = sender
            .parse()
            .map_err(|e| DeliveryError::new(DeliveryStep::Sender, format!("{sender}: {e}")))?;
        self.conn
            .command(Mail::new(Some(address), vec![]))
            .map(drop)
            .map_err(failed(DeliveryStep::Sender))
    }

    fn rcpt_to(&mut self, recipient: &str) -> Result<(), DeliveryError> {
        let address: Address = recipient
            .parse()
            .map_err(|e| DeliveryError::new(DeliveryStep::Recipient, format!("{recipient}: {e}")))?;
        self.conn
            .command(Rcpt::new(address, vec![]))
            .map(drop)
            .map_err(failed(DeliveryStep::Recipient))
    }

    fn data(&mut self, payload: &[u8]) -> Result<(), DeliveryError> {
        self.conn
            .command(Data)
            .map_err(failed(DeliveryStep::Data))?;

        // A reply code means the body went out and the final dot was refused
        self.conn.message(payload).map(drop).map_err(|e| {
            let step = if e.status().is_some() {
                DeliveryStep::Close
            } else {
                DeliveryStep::Data
            };
            DeliveryError::new(step, e.to_string())
        })
    }

    fn quit(&mut self) -> Result<(), DeliveryError> {
        self.conn
            .quit()
            .map(drop)
            .map_err(failed(DeliveryStep::Quit))
    }
}
