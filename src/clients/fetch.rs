//! Plain HTTP page fetching for the web tools.

use super::{ensure_success, HttpSettings};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

/// A downloaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Fetches a URL. The seam web tools are tested through.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// Fetcher backed by a fresh reqwest client per call.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: HttpSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: HttpSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!("GET {}", url);
        let resp = self
            .settings
            .client()?
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;
        let resp = ensure_success("GET", resp).await?;

        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let body = resp.text().await.context("Failed to read response body")?;

        Ok(FetchedPage {
            url: final_url,
            status,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Serves a canned page and remembers requested URLs.
    pub struct StubFetcher {
        pub body: String,
        pub requested: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        pub fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(FetchedPage {
                url: url.to_string(),
                status: 200,
                body: self.body.clone(),
            })
        }
    }
}
