//! Twilio REST client for SMS and voice calls.

use super::{ensure_success, HttpSettings};
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TwilioClient {
    base_url: String,
    account_sid: String,
    auth_token: String,
    settings: HttpSettings,
}

/// The part of a Messages/Calls resource the tools report.
#[derive(Debug, Deserialize)]
pub struct TwilioResource {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl TwilioClient {
    pub fn new(
        base_url: &str,
        account_sid: &str,
        auth_token: &str,
        settings: HttpSettings,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            settings,
        }
    }

    fn account_url(&self, resource: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/{}.json",
            self.base_url, self.account_sid, resource
        )
    }

    /// Send an SMS; returns the message resource.
    pub async fn send_message(&self, from: &str, to: &str, body: &str) -> Result<TwilioResource> {
        debug!("Twilio SMS {} -> {}", from, to);
        self.create("Messages", &[("From", from), ("To", to), ("Body", body)])
            .await
    }

    /// Place a call that speaks the given TwiML; returns the call resource.
    pub async fn create_call(&self, from: &str, to: &str, twiml: &str) -> Result<TwilioResource> {
        debug!("Twilio call {} -> {}", from, to);
        self.create("Calls", &[("From", from), ("To", to), ("Twiml", twiml)])
            .await
    }

    async fn create(&self, resource: &str, form: &[(&str, &str)]) -> Result<TwilioResource> {
        let resp = self
            .settings
            .client()?
            .post(self.account_url(resource))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(form)
            .send()
            .await
            .with_context(|| format!("Twilio {} request failed", resource))?;
        let resp = ensure_success("Twilio", resp).await?;

        resp.json()
            .await
            .with_context(|| format!("Failed to parse Twilio {} response", resource))
    }
}

/// TwiML document that reads `message` aloud.
pub fn say_twiml(message: &str) -> String {
    format!("<Response><Say>{}</Say></Response>", xml_escape(message))
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
