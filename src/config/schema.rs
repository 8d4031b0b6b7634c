//! Configuration schema for toolkit.toml.

use crate::error::ToolkitError;
use crate::types::ToolDescriptor;
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Directory holding the per-tool programs started by `launch`.
    pub programs_dir: String,

    /// Optional interpreter placed before the program (e.g. "python3").
    pub interpreter: String,

    /// Suffix appended to an entrypoint to form its program file name.
    pub program_extension: String,

    /// Terminal invocation on Linux; the program follows these words.
    pub terminal_command: Vec<String>,

    /// Log level (debug, info, warn, error).
    pub log_level: String,

    /// SMTP relay used by "Send Email" (STARTTLS).
    pub smtp_host: String,
    pub smtp_port: u16,

    /// Timeout applied to every HTTP request.
    pub http_timeout_secs: u64,

    pub user_agent: String,

    pub twilio_api_url: String,
    pub sendgrid_api_url: String,
    pub twitter_api_url: String,
    pub search_url: String,

    /// Spoken when a call is placed without a custom message.
    pub default_call_message: String,

    /// Where generated images and downloaded pages are written.
    pub output_dir: String,

    /// TrueType fonts tried in order when drawing text on images.
    pub font_paths: Vec<String>,

    /// Extra launch-only tools appended to the built-in catalog.
    pub tools: Vec<ToolDescriptor>,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            programs_dir: "~/.toolkit/programs".into(),
            interpreter: String::new(),
            program_extension: String::new(),
            terminal_command: vec!["gnome-terminal".into(), "--".into()],
            log_level: "warn".into(),
            smtp_host: "smtp.gmail.com".into(),
            smtp_port: 587,
            http_timeout_secs: 15,
            user_agent: format!("automation-toolkit/{}", env!("CARGO_PKG_VERSION")),
            twilio_api_url: "https://api.twilio.com".into(),
            sendgrid_api_url: "https://api.sendgrid.com".into(),
            twitter_api_url: "https://api.twitter.com".into(),
            search_url: "https://www.google.com/search".into(),
            default_call_message: "Hello from the automation toolkit!".into(),
            output_dir: ".".into(),
            font_paths: vec![
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".into(),
                "/usr/share/fonts/TTF/DejaVuSans.ttf".into(),
                "/usr/share/fonts/dejavu/DejaVuSans.ttf".into(),
                "/System/Library/Fonts/Supplemental/Arial.ttf".into(),
                "/Library/Fonts/Arial.ttf".into(),
                "C:\\Windows\\Fonts\\arial.ttf".into(),
            ],
            tools: Vec::new(),
        }
    }
}

impl ToolkitConfig {
    /// Resolve a path that may contain `~` to an absolute path.
    pub fn resolve_path(&self, path: &str) -> String {
        shellexpand::tilde(path).into_owned()
    }

    pub fn resolved_programs_dir(&self) -> String {
        self.resolve_path(&self.programs_dir)
    }

    pub fn resolved_output_dir(&self) -> String {
        self.resolve_path(&self.output_dir)
    }

    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.http_timeout_secs)
    }

    /// Reject settings no tool can work with.
    ///
    /// Name collisions between `[[tools]]` and the built-in catalog are
    /// caught later, when the registry is assembled.
    pub fn validate(&self) -> Result<(), ToolkitError> {
        let bad = |msg: String| Err(ToolkitError::Configuration(msg));

        if self.http_timeout_secs == 0 {
            return bad("http_timeout_secs must be at least 1".into());
        }
        if self.smtp_port == 0 {
            return bad("smtp_port must be a valid port".into());
        }
        if self.terminal_command.iter().all(|w| w.trim().is_empty()) {
            return bad("terminal_command must name a terminal program".into());
        }
        for (idx, tool) in self.tools.iter().enumerate() {
            if tool.name.trim().is_empty() {
                return bad(format!("[[tools]] entry #{} has an empty name", idx + 1));
            }
            if tool.entrypoint.trim().is_empty() {
                return bad(format!("tool '{}' has an empty entrypoint", tool.name));
            }
        }
        Ok(())
    }
}
