//! SendGrid v3 mail client.

use super::{ensure_success, HttpSettings};
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct SendGridClient {
    base_url: String,
    api_key: String,
    settings: HttpSettings,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MailRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Debug, Serialize, PartialEq)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize, PartialEq)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize, PartialEq)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

impl<'a> MailRequest<'a> {
    /// Single-recipient plain-text message.
    pub fn plain_text(from: &'a str, to: &'a str, subject: &'a str, body: &'a str) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![Address { email: to }],
            }],
            from: Address { email: from },
            subject,
            content: vec![Content {
                kind: "text/plain",
                value: body,
            }],
        }
    }
}

impl SendGridClient {
    pub fn new(base_url: &str, api_key: &str, settings: HttpSettings) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            settings,
        }
    }

    /// Send a message; returns the HTTP status code (202 when accepted).
    pub async fn send(&self, mail: &MailRequest<'_>) -> Result<u16> {
        let resp = self
            .settings
            .client()?
            .post(format!("{}/v3/mail/send", self.base_url))
            .bearer_auth(&self.api_key)
            .json(mail)
            .send()
            .await
            .context("SendGrid request failed")?;
        let resp = ensure_success("SendGrid", resp).await?;
        Ok(resp.status().as_u16())
    }
}
