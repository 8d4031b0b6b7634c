//! Twilio tools: SMS and automated voice calls.

use super::{opt_str_arg, str_arg, ToolHandler};
use crate::clients::twilio::say_twiml;
use crate::clients::{HttpSettings, TwilioClient};
use crate::config::ToolkitConfig;
use crate::types::{InputField, ToolOutput};
use anyhow::Result;
use async_trait::async_trait;

const NOTES: &[&str] = &["Twilio Account SID, Auth Token and a Twilio phone number are required."];

fn credential_fields() -> Vec<InputField> {
    vec![
        InputField::text("account_sid", "Twilio Account SID"),
        InputField::secret("auth_token", "Twilio Auth Token"),
        InputField::text_with_default("from", "From (Twilio number)", "+1234567890"),
        InputField::text_with_default("to", "To (recipient)", "+1234567890"),
    ]
}

// ---------------------------------------------------------------------------
// Send SMS
// ---------------------------------------------------------------------------

pub struct SmsSender {
    api_url: String,
    http: HttpSettings,
}

impl SmsSender {
    pub fn new(config: &ToolkitConfig, http: HttpSettings) -> Self {
        Self {
            api_url: config.twilio_api_url.clone(),
            http,
        }
    }
}

#[async_trait]
impl ToolHandler for SmsSender {
    fn entrypoint(&self) -> &str {
        "sms_sender"
    }

    fn title(&self) -> &str {
        "SMS Sender (Twilio)"
    }

    fn notes(&self) -> &[&str] {
        NOTES
    }

    fn fields(&self) -> Vec<InputField> {
        let mut fields = credential_fields();
        fields.push(InputField::multiline("message", "Message"));
        fields
    }

    fn action_label(&self) -> &str {
        "Send SMS"
    }

    async fn execute(&self, params: &serde_json::Value) -> Result<ToolOutput> {
        let client = TwilioClient::new(
            &self.api_url,
            str_arg(params, "account_sid")?,
            str_arg(params, "auth_token")?,
            self.http.clone(),
        );
        let to = str_arg(params, "to")?;
        let msg = client
            .send_message(str_arg(params, "from")?, to, str_arg(params, "message")?)
            .await?;

        Ok(ToolOutput::new(format!("Sent SID: {}", msg.sid), format!("To: {}", to)))
    }
}

// ---------------------------------------------------------------------------
// Make a Phone Call
// ---------------------------------------------------------------------------

const CALL_MODES: &[&str] = &["Default message", "Custom"];

pub struct PhoneCaller {
    api_url: String,
    default_message: String,
    http: HttpSettings,
}

impl PhoneCaller {
    pub fn new(config: &ToolkitConfig, http: HttpSettings) -> Self {
        Self {
            api_url: config.twilio_api_url.clone(),
            default_message: config.default_call_message.clone(),
            http,
        }
    }

    /// TwiML for the call: the custom text when given, else the default greeting.
    pub fn twiml(&self, params: &serde_json::Value) -> String {
        let custom = if params["mode"].as_str() == Some("Custom") {
            opt_str_arg(params, "custom")
        } else {
            None
        };
        say_twiml(custom.unwrap_or(&self.default_message))
    }
}

#[async_trait]
impl ToolHandler for PhoneCaller {
    fn entrypoint(&self) -> &str {
        "phone_caller"
    }

    fn title(&self) -> &str {
        "Phone Caller (Twilio)"
    }

    fn notes(&self) -> &[&str] {
        NOTES
    }

    fn fields(&self) -> Vec<InputField> {
        let mut fields = credential_fields();
        fields.push(InputField::choice("mode", "Message", CALL_MODES));
        fields.push(
            InputField::text("custom", "Custom text")
                .optional()
                .when("mode", "Custom"),
        );
        fields
    }

    fn action_label(&self) -> &str {
        "Make Call"
    }

    async fn execute(&self, params: &serde_json::Value) -> Result<ToolOutput> {
        let client = TwilioClient::new(
            &self.api_url,
            str_arg(params, "account_sid")?,
            str_arg(params, "auth_token")?,
            self.http.clone(),
        );
        let to = str_arg(params, "to")?;
        let call = client
            .create_call(str_arg(params, "from")?, to, &self.twiml(params))
            .await?;

        let mut out = ToolOutput::new(format!("Call SID: {}", call.sid), format!("To: {}", to));
        if let Some(status) = call.status {
            out = out.detail(format!("Status: {}", status));
        }
        Ok(out)
    }
}
