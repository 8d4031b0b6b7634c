//! "Download Website Data": fetch a page, report its title and a preview.

use super::{bool_arg, opt_str_arg, str_arg, ToolHandler};
use crate::clients::PageFetcher;
use crate::config::ToolkitConfig;
use crate::types::{InputField, ToolOutput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::sync::Arc;

/// Characters of HTML shown in the preview.
pub const PREVIEW_CHARS: usize = 3000;

const DEFAULT_FILENAME: &str = "website_data.html";

/// Prefix `https://` unless the URL already names http or https.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Contents of the first `<title>` element, whitespace-collapsed.
pub fn extract_title(html: &str) -> Option<String> {
    let re = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").ok()?;
    let title = re.captures(html)?.get(1)?.as_str();
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

pub struct WebsiteDownloader {
    output_dir: PathBuf,
    fetcher: Arc<dyn PageFetcher>,
}

impl WebsiteDownloader {
    pub fn new(config: &ToolkitConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            output_dir: PathBuf::from(config.resolved_output_dir()),
            fetcher,
        }
    }
}

#[async_trait]
impl ToolHandler for WebsiteDownloader {
    fn entrypoint(&self) -> &str {
        "website_downloader"
    }

    fn title(&self) -> &str {
        "Website Data Downloader"
    }

    fn fields(&self) -> Vec<InputField> {
        vec![
            InputField::text_with_default("url", "URL", "https://example.com"),
            InputField::checkbox("save", "Save HTML to file", false),
            InputField::text_with_default("filename", "Filename", DEFAULT_FILENAME)
                .optional()
                .when("save", "true"),
        ]
    }

    fn action_label(&self) -> &str {
        "Fetch"
    }

    async fn execute(&self, params: &serde_json::Value) -> Result<ToolOutput> {
        let url = normalize_url(str_arg(params, "url")?);
        let page = self.fetcher.fetch(&url).await?;

        let title = extract_title(&page.body).unwrap_or_else(|| "(no title)".into());
        let preview: String = page.body.chars().take(PREVIEW_CHARS).collect();
        let total_chars = page.body.chars().count();

        let mut out = ToolOutput::new(
            format!("Fetched. Status {}. Title: {}", page.status, title),
            url.clone(),
        )
        .detail(format!("Content Length: {} characters", total_chars))
        .detail(format!("=== HTML (first {} characters) ===", PREVIEW_CHARS))
        .detail(preview);
        if total_chars > PREVIEW_CHARS {
            out = out.detail("... (content truncated)");
        }

        if bool_arg(params, "save") {
            let filename = opt_str_arg(params, "filename").unwrap_or(DEFAULT_FILENAME);
            let path = self.output_dir.join(filename);
            tokio::fs::write(&path, &page.body)
                .await
                .with_context(|| format!("Failed to save {}", path.display()))?;
            out = out.detail(format!("Content saved to {}", path.display()));
        }

        Ok(out)
    }
}
