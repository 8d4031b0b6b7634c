//! WhatsApp tools: both drive WhatsApp Web through the default browser.

use super::{bool_arg, int_arg, str_arg, ToolHandler};
use crate::error::ToolkitError;
use crate::launcher::UrlOpener;
use crate::types::{InputField, ToolOutput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Local, NaiveTime};
use std::time::Duration;
use tracing::info;

/// Minimum lead time for a scheduled message; WhatsApp Web needs it to load.
pub const MIN_LEAD_SECS: i64 = 15;

const MODES: &[&str] = &["Send instantly", "Schedule"];

/// `https://web.whatsapp.com/send` link for a number and message.
pub fn web_send_url(phone: &str, message: &str) -> String {
    format!(
        "https://web.whatsapp.com/send?phone={}&text={}",
        digits(phone),
        urlencoding::encode(message)
    )
}

/// `https://wa.me` click-to-chat link; works without saving the contact.
pub fn click_to_chat_url(phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        phone.trim().replace('+', ""),
        urlencoding::encode(message)
    )
}

fn digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Time until the next `hour:minute`, rolling over to tomorrow if already past.
pub fn schedule_delay(now: NaiveTime, hour: u32, minute: u32) -> Result<Duration, ToolkitError> {
    let target = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        ToolkitError::invalid("hour", format!("{hour:02}:{minute:02} is not a time of day"))
    })?;

    let mut delta = target.signed_duration_since(now);
    if delta < chrono::Duration::zero() {
        delta += chrono::Duration::hours(24);
    }
    if delta < chrono::Duration::seconds(MIN_LEAD_SECS) {
        return Err(ToolkitError::invalid(
            "minute",
            format!("scheduled time must be at least {MIN_LEAD_SECS} seconds from now"),
        ));
    }

    delta
        .to_std()
        .map_err(|e| ToolkitError::invalid("minute", e.to_string()))
}

// ---------------------------------------------------------------------------
// Send WhatsApp Message
// ---------------------------------------------------------------------------

pub struct WhatsAppSender {
    opener: UrlOpener,
}

impl WhatsAppSender {
    pub fn new(opener: UrlOpener) -> Self {
        Self { opener }
    }
}

#[async_trait]
impl ToolHandler for WhatsAppSender {
    fn entrypoint(&self) -> &str {
        "whatsapp_sender"
    }

    fn title(&self) -> &str {
        "WhatsApp Message Sender"
    }

    fn notes(&self) -> &[&str] {
        &["Requires WhatsApp Web to be logged in in your default browser."]
    }

    fn fields(&self) -> Vec<InputField> {
        vec![
            InputField::choice("mode", "Mode", MODES),
            InputField::text("phone", "Phone number (with country code, e.g. +91xxxxxxxxxx)"),
            InputField::multiline("message", "Message"),
            InputField::number("hour", "Hour (24h)", 0, 23, 12).when("mode", "Schedule"),
            InputField::number("minute", "Minute", 0, 59, 0).when("mode", "Schedule"),
        ]
    }

    fn action_label(&self) -> &str {
        "Send via WhatsApp"
    }

    async fn execute(&self, params: &serde_json::Value) -> Result<ToolOutput> {
        let mode = str_arg(params, "mode")?;
        let phone = str_arg(params, "phone")?;
        let message = str_arg(params, "message")?;

        if !phone.trim().starts_with('+') {
            return Err(
                ToolkitError::invalid("phone", "country code missing in phone number").into(),
            );
        }

        let url = web_send_url(phone, message);

        if mode == "Schedule" {
            let hour = int_arg(params, "hour")? as u32;
            let minute = int_arg(params, "minute")? as u32;
            let delay = schedule_delay(Local::now().time(), hour, minute)?;
            info!(
                "WhatsApp message scheduled for {:02}:{:02} ({}s from now)",
                hour,
                minute,
                delay.as_secs()
            );
            tokio::time::sleep(delay).await;
        }

        self.opener
            .open(&url)
            .context("Failed to open WhatsApp Web")?;

        Ok(ToolOutput::new("Triggered in WhatsApp Web.", mode)
            .detail("Press Enter in the opened chat if the message is not sent automatically."))
    }
}

// ---------------------------------------------------------------------------
// Send WhatsApp Without Saving Contact
// ---------------------------------------------------------------------------

pub struct WhatsAppWebOpener {
    opener: UrlOpener,
}

impl WhatsAppWebOpener {
    pub fn new(opener: UrlOpener) -> Self {
        Self { opener }
    }
}

#[async_trait]
impl ToolHandler for WhatsAppWebOpener {
    fn entrypoint(&self) -> &str {
        "whatsapp_web_opener"
    }

    fn title(&self) -> &str {
        "WhatsApp Web Opener"
    }

    fn fields(&self) -> Vec<InputField> {
        vec![
            InputField::text("phone", "Phone number (with country code)"),
            InputField::text("message", "Prefilled message"),
            InputField::checkbox("open_browser", "Open the chat in the browser", true),
        ]
    }

    fn action_label(&self) -> &str {
        "Generate Chat Link"
    }

    async fn execute(&self, params: &serde_json::Value) -> Result<ToolOutput> {
        let phone = str_arg(params, "phone")?;
        let message = str_arg(params, "message")?;
        let url = click_to_chat_url(phone, message);

        let headline = if bool_arg(params, "open_browser") {
            self.opener
                .open(&url)
                .context("Failed to open WhatsApp Web")?;
            "WhatsApp Web opened."
        } else {
            "Chat link generated."
        };

        Ok(ToolOutput::new(headline, url.clone()).detail(format!("Open chat: {}", url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::testing::RecordingSpawner;
    use crate::launcher::Platform;
    use serde_json::json;
    use std::sync::Arc;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn click_to_chat_strips_plus_and_encodes() {
        assert_eq!(
            click_to_chat_url("+919876543210", "hi there & bye"),
            "https://wa.me/919876543210?text=hi%20there%20%26%20bye"
        );
        assert_eq!(
            click_to_chat_url("+15551234", "ok"),
            "https://wa.me/15551234?text=ok"
        );
    }

    #[test]
    fn web_send_keeps_only_digits() {
        assert_eq!(
            web_send_url("+1 (555) 123", "yo"),
            "https://web.whatsapp.com/send?phone=1555123&text=yo"
        );
    }

    #[test]
    fn delay_later_today() {
        let d = schedule_delay(at(10, 0, 0), 10, 30).unwrap();
        assert_eq!(d, Duration::from_secs(30 * 60));
    }

    #[test]
    fn delay_rolls_over_to_tomorrow() {
        let d = schedule_delay(at(23, 0, 0), 1, 0).unwrap();
        assert_eq!(d, Duration::from_secs(2 * 3600));
    }

    #[test]
    fn delay_too_close_is_rejected() {
        let err = schedule_delay(at(12, 0, 50), 12, 1).unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidParameter { .. }));
    }

    #[tokio::test]
    async fn opener_link_is_opened_in_browser() {
        let spawner = Arc::new(RecordingSpawner::default());
        let handler = WhatsAppWebOpener::new(UrlOpener::new(Platform::Linux, spawner.clone()));
        let out = handler
            .execute(&json!({"phone": "+15551234", "message": "hello", "open_browser": true}))
            .await
            .unwrap();

        assert_eq!(out.log_message, "https://wa.me/15551234?text=hello");
        assert_eq!(spawner.calls()[0].args, vec!["https://wa.me/15551234?text=hello"]);
    }

    #[tokio::test]
    async fn instant_send_requires_country_code() {
        let spawner = Arc::new(RecordingSpawner::default());
        let handler = WhatsAppSender::new(UrlOpener::new(Platform::Linux, spawner.clone()));
        let err = handler
            .execute(&json!({"mode": "Send instantly", "phone": "98765", "message": "hi"}))
            .await
            .unwrap_err();

        assert!(matches!(
            ToolkitError::from_handler(err),
            ToolkitError::InvalidParameter { .. }
        ));
        assert!(spawner.calls().is_empty());
    }

    #[tokio::test]
    async fn instant_send_opens_web_whatsapp() {
        let spawner = Arc::new(RecordingSpawner::default());
        let handler = WhatsAppSender::new(UrlOpener::new(Platform::Linux, spawner.clone()));
        let out = handler
            .execute(&json!({"mode": "Send instantly", "phone": "+4912345", "message": "hi"}))
            .await
            .unwrap();

        assert_eq!(out.log_message, "Send instantly");
        assert_eq!(
            spawner.calls()[0].args,
            vec!["https://web.whatsapp.com/send?phone=4912345&text=hi"]
        );
    }
}
