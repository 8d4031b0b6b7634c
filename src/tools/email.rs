//! Email tools: SMTP with an app password, and SendGrid.

use super::{str_arg, ToolHandler};
use crate::clients::sendgrid::MailRequest;
use crate::clients::smtp::{self, SmtpRelay};
use crate::clients::{HttpSettings, SendGridClient};
use crate::config::ToolkitConfig;
use crate::types::{InputField, ToolOutput};
use anyhow::Result;
use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Send Email (SMTP)
// ---------------------------------------------------------------------------

pub struct EmailSender {
    relay: SmtpRelay,
}

impl EmailSender {
    pub fn new(config: &ToolkitConfig) -> Self {
        Self {
            relay: SmtpRelay {
                host: config.smtp_host.clone(),
                port: config.smtp_port,
                timeout: config.http_timeout(),
            },
        }
    }
}

#[async_trait]
impl ToolHandler for EmailSender {
    fn entrypoint(&self) -> &str {
        "email_sender"
    }

    fn title(&self) -> &str {
        "Email Sender"
    }

    fn notes(&self) -> &[&str] {
        &["Use a Gmail App Password (requires 2FA)."]
    }

    fn fields(&self) -> Vec<InputField> {
        vec![
            InputField::text("sender", "Sender email"),
            InputField::secret("app_password", "App password"),
            InputField::text("receiver", "Receiver email"),
            InputField::text("subject", "Subject"),
            InputField::multiline("body", "Body"),
        ]
    }

    fn action_label(&self) -> &str {
        "Send Email"
    }

    async fn execute(&self, params: &serde_json::Value) -> Result<ToolOutput> {
        let sender = str_arg(params, "sender")?;
        let password = str_arg(params, "app_password")?;
        let receiver = str_arg(params, "receiver")?;
        let subject = str_arg(params, "subject")?;
        let body = str_arg(params, "body")?;

        let message = smtp::build_message(sender, receiver, subject, body)?;
        smtp::send(&self.relay, sender, password, message).await?;

        Ok(ToolOutput::new("Email sent.", format!("To: {}", receiver)))
    }
}

// ---------------------------------------------------------------------------
// Send Anonymous Email (SendGrid)
// ---------------------------------------------------------------------------

pub struct AnonymousEmail {
    api_url: String,
    http: HttpSettings,
}

impl AnonymousEmail {
    pub fn new(config: &ToolkitConfig, http: HttpSettings) -> Self {
        Self {
            api_url: config.sendgrid_api_url.clone(),
            http,
        }
    }
}

#[async_trait]
impl ToolHandler for AnonymousEmail {
    fn entrypoint(&self) -> &str {
        "anonymous_email"
    }

    fn title(&self) -> &str {
        "Anonymous Email Sender (SendGrid)"
    }

    fn notes(&self) -> &[&str] {
        &["SendGrid API key required. Get one from https://sendgrid.com/"]
    }

    fn fields(&self) -> Vec<InputField> {
        vec![
            InputField::secret("api_key", "SendGrid API Key"),
            InputField::text("from_email", "From email"),
            InputField::text("to_email", "To email"),
            InputField::text("subject", "Subject"),
            InputField::multiline("body", "Body"),
        ]
    }

    fn action_label(&self) -> &str {
        "Send via SendGrid"
    }

    async fn execute(&self, params: &serde_json::Value) -> Result<ToolOutput> {
        let api_key = str_arg(params, "api_key")?;
        let from = str_arg(params, "from_email")?;
        let to = str_arg(params, "to_email")?;
        let subject = str_arg(params, "subject")?;
        let body = str_arg(params, "body")?;

        let client = SendGridClient::new(&self.api_url, api_key, self.http.clone());
        let status = client
            .send(&MailRequest::plain_text(from, to, subject, body))
            .await?;

        Ok(ToolOutput::new(format!("Sent. Status: {}", status), format!("To: {}", to)))
    }
}
