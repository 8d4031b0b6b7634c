//! Built-in tool catalog.

use crate::types::ToolDescriptor;

pub const SYSTEM: &str = "System Tools";
pub const COMMUNICATION: &str = "Communication";
pub const WEB: &str = "Web & Social";
pub const UTILITIES: &str = "Utilities";

/// Descriptors for every tool shipped with the toolkit, in menu order.
pub fn builtin_descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            SYSTEM,
            "Read RAM",
            "ram_monitor",
            "Monitor system memory usage",
            &["sysinfo"],
            false,
        ),
        ToolDescriptor::new(
            COMMUNICATION,
            "Send WhatsApp Message",
            "whatsapp_sender",
            "Send instant or scheduled WhatsApp messages through WhatsApp Web",
            &["web browser"],
            true,
        ),
        ToolDescriptor::new(
            COMMUNICATION,
            "Send Email",
            "email_sender",
            "Send emails via Gmail SMTP",
            &["lettre"],
            true,
        ),
        ToolDescriptor::new(
            COMMUNICATION,
            "Send WhatsApp Without Saving Contact",
            "whatsapp_web_opener",
            "Open WhatsApp Web with a pre-filled message",
            &["web browser"],
            true,
        ),
        ToolDescriptor::new(
            COMMUNICATION,
            "Send SMS",
            "sms_sender",
            "Send SMS using the Twilio API",
            &["twilio"],
            true,
        ),
        ToolDescriptor::new(
            COMMUNICATION,
            "Make a Phone Call",
            "phone_caller",
            "Make automated phone calls",
            &["twilio"],
            true,
        ),
        ToolDescriptor::new(
            COMMUNICATION,
            "Send Anonymous Email",
            "anonymous_email",
            "Send emails using the SendGrid API",
            &["sendgrid"],
            true,
        ),
        ToolDescriptor::new(
            WEB,
            "Google Search",
            "google_search",
            "Perform Google searches",
            &["reqwest", "regex"],
            true,
        ),
        ToolDescriptor::new(
            WEB,
            "Post on Twitter (X)",
            "twitter_poster",
            "Post tweets to Twitter/X",
            &["twitter api v2"],
            true,
        ),
        ToolDescriptor::new(
            WEB,
            "Download Website Data",
            "website_downloader",
            "Download and parse website content",
            &["reqwest", "regex"],
            true,
        ),
        ToolDescriptor::new(
            UTILITIES,
            "Array vs Vec Difference",
            "array_vs_vec",
            "Educational comparison of fixed-size arrays and vectors",
            &[],
            false,
        ),
        ToolDescriptor::new(
            UTILITIES,
            "Create Digital Image",
            "image_creator",
            "Create custom digital images",
            &["image", "imageproc"],
            true,
        ),
    ]
}
