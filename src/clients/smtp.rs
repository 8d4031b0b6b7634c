//! SMTP delivery over STARTTLS with username/app-password login.

use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::debug;

/// Relay settings for one delivery.
#[derive(Debug, Clone)]
pub struct SmtpRelay {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

/// Build a plain-text message from sender to receiver.
pub fn build_message(from: &str, to: &str, subject: &str, body: &str) -> Result<Message> {
    let from: Mailbox = from
        .parse()
        .with_context(|| format!("Invalid sender address '{}'", from))?;
    let to: Mailbox = to
        .parse()
        .with_context(|| format!("Invalid receiver address '{}'", to))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .context("Failed to build email message")
}

/// Log in as `username` and send `message` through the relay.
pub async fn send(
    relay: &SmtpRelay,
    username: &str,
    password: &str,
    message: Message,
) -> Result<()> {
    debug!("SMTP {}:{} as {}", relay.host, relay.port, username);
    let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&relay.host)
        .with_context(|| format!("Failed to configure SMTP relay {}", relay.host))?
        .port(relay.port)
        .credentials(Credentials::new(username.to_string(), password.to_string()))
        .timeout(Some(relay.timeout))
        .build();

    mailer
        .send(message)
        .await
        .context("SMTP delivery failed")?;
    Ok(())
}
