//! Thin clients for the third-party services the tools call.
//!
//! Every call builds its own client and drops it afterwards; nothing is pooled.

pub mod fetch;
pub mod oauth;
pub mod sendgrid;
pub mod smtp;
#[cfg(test)]
pub(crate) mod stub_server;
pub mod twilio;
pub mod twitter;

pub use fetch::{FetchedPage, PageFetcher, ReqwestFetcher};
pub use sendgrid::SendGridClient;
pub use twilio::TwilioClient;
pub use twitter::TwitterClient;

use crate::config::ToolkitConfig;
use anyhow::{bail, Context, Result};
use std::time::Duration;

/// Settings shared by every HTTP client the toolkit builds.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub user_agent: String,
}

impl HttpSettings {
    pub fn from_config(config: &ToolkitConfig) -> Self {
        Self {
            timeout: config.http_timeout(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Build a fresh client for a single call.
    pub fn client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client")
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self::from_config(&ToolkitConfig::default())
    }
}

/// Turn a non-2xx response into an error carrying the body.
pub(crate) async fn ensure_success(
    service: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("{} request failed ({}): {}", service, status, body);
    }
    Ok(resp)
}
