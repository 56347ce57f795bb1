//! Notification message.
//!
//! Plain-text email with `From`, `To` and `Subject` headers, rendered in the
//! wire form handed to the relay.

use super::AgeTier;
use crate::error::ValidationError;

const CRLF: &str = "\r\n";

/// One email about one stale key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    sender: String,
    recipient: String,
    subject: String,
    body: String,
}

impl NotificationMessage {
    /// Build a message, rejecting header values that contain line breaks.
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let message = Self {
            sender: sender.into(),
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        };

        for (field, value) in [
            ("sender", &message.sender),
            ("recipient", &message.recipient),
            ("subject", &message.subject),
        ] {
            if value.contains(['\r', '\n']) {
                return Err(ValidationError::HeaderInjection { field });
            }
        }

        Ok(message)
    }

    /// Build the rotation notice for a tier.
    ///
    /// Returns `Ok(None)` for [`AgeTier::Fresh`], which never gets mail.
    pub fn for_tier(
        tier: AgeTier,
        sender: &str,
        recipient: &str,
        rotation_url: &str,
    ) -> Result<Option<Self>, ValidationError> {
        let Some(subject) = tier.subject() else {
            return Ok(None);
        };

        let opening = match tier {
            AgeTier::Expired => "Hello, your IAM Access Keys are at least 90 days old.",
            _ => "Hello, your IAM Access Keys are nearing 90 days old.",
        };
        let body = format!(
            "{opening}\n\n\
             Please rotate your access keys. You can use the script located at\n\
             {rotation_url}\n\n\
             Thank you for doing your part to keep our accounts more secure!\n"
        );

        Self::new(sender, recipient, subject, body).map(Some)
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Headers, a blank line, then the body.
    pub fn render(&self) -> String {
        format!(
            "From: {}{CRLF}To: {}{CRLF}Subject: {}{CRLF}{CRLF}{}",
            self.sender, self.recipient, self.subject, self.body
        )
    }

    /// Parse the output of [`render`](Self::render).
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let (head, body) = raw
            .split_once("\r\n\r\n")
            .ok_or_else(|| ValidationError::MalformedMessage("no header terminator".into()))?;

        let mut lines = head.split(CRLF);
        let mut header = |name: &str| {
            lines
                .next()
                .and_then(|line| line.strip_prefix(name))
                .and_then(|rest| rest.strip_prefix(": "))
                .map(str::to_string)
                .ok_or_else(|| ValidationError::MalformedMessage(format!("expected {name} header")))
        };

        let sender = header("From")?;
        let recipient = header("To")?;
        let subject = header("Subject")?;
        if lines.next().is_some() {
            return Err(ValidationError::MalformedMessage(
                "unexpected extra header".into(),
            ));
        }

        Self::new(sender, recipient, subject, body)
    }
}
