//! "Google Search": fetch the results page and list the result links.

use super::{int_arg, str_arg, ToolHandler};
use crate::clients::PageFetcher;
use crate::config::ToolkitConfig;
use crate::types::{InputField, ToolOutput};
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;

pub struct GoogleSearch {
    search_url: String,
    fetcher: Arc<dyn PageFetcher>,
}

impl GoogleSearch {
    pub fn new(config: &ToolkitConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            search_url: config.search_url.clone(),
            fetcher,
        }
    }

    pub fn query_url(&self, query: &str, num: i64) -> String {
        // Ask for a couple extra; ads and internal links get filtered out.
        format!(
            "{}?q={}&num={}&hl=en",
            self.search_url,
            urlencoding::encode(query),
            num + 2
        )
    }
}

/// Result links in page order: `/url?q=` redirects and direct external anchors.
pub fn parse_result_links(html: &str, limit: usize) -> Result<Vec<String>> {
    let re = Regex::new(r#"href="(?:/url\?q=([^"&]+)[^"]*|(https?://[^"]+))""#)?;
    let mut links: Vec<String> = Vec::new();

    for caps in re.captures_iter(html) {
        let raw = match (caps.get(1), caps.get(2)) {
            (Some(redirect), _) => urlencoding::decode(redirect.as_str())
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| redirect.as_str().to_string()),
            (None, Some(direct)) => direct.as_str().replace("&amp;", "&"),
            _ => continue,
        };

        if !raw.starts_with("http") || is_internal(&raw) || links.contains(&raw) {
            continue;
        }
        links.push(raw);
        if links.len() >= limit {
            break;
        }
    }

    Ok(links)
}

fn is_internal(url: &str) -> bool {
    let host = url
        .split("://")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .unwrap_or("");
    host.contains("google.") || host.ends_with("gstatic.com") || host.contains("googleusercontent")
}

#[async_trait]
impl ToolHandler for GoogleSearch {
    fn entrypoint(&self) -> &str {
        "google_search"
    }

    fn title(&self) -> &str {
        "Google Search"
    }

    fn fields(&self) -> Vec<InputField> {
        vec![
            InputField::text("query", "Search query"),
            InputField::number("num_results", "Number of results", 1, 20, 5),
        ]
    }

    fn action_label(&self) -> &str {
        "Search"
    }

    async fn execute(&self, params: &serde_json::Value) -> Result<ToolOutput> {
        let query = str_arg(params, "query")?;
        let num = int_arg(params, "num_results")?;

        let page = self.fetcher.fetch(&self.query_url(query, num)).await?;
        let links = parse_result_links(&page.body, num.max(1) as usize)?;

        let mut out = if links.is_empty() {
            ToolOutput::new("No results found.", query)
        } else {
            ToolOutput::new(format!("Results for '{}':", query), query)
        };
        for (i, link) in links.iter().enumerate() {
            out = out.detail(format!("{}. {}", i + 1, link));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::fetch::testing::StubFetcher;
    use serde_json::json;

    const PAGE: &str = r#"
<a href="/search?q=rust&amp;tbm=isch">Images</a>
<a href="/url?q=https://www.rust-lang.org/&amp;sa=U&amp;ved=abc">Rust</a>
<a href="/url?q=https://doc.rust-lang.org/book/&amp;sa=U">Book</a>
<a href="https://maps.google.com/maps?q=rust">Maps</a>
<a href="/url?q=https://www.rust-lang.org/&amp;sa=U">Rust again</a>
<a href="https://en.wikipedia.org/wiki/Rust_(programming_language)">Wiki</a>
<a href="/url?q=https://crates.io/%3Fq%3Dserde&amp;sa=U">crates</a>
"#;

    #[test]
    fn extracts_external_links_in_order() {
        let links = parse_result_links(PAGE, 10).unwrap();
        assert_eq!(
            links,
            vec![
                "https://www.rust-lang.org/",
                "https://doc.rust-lang.org/book/",
                "https://en.wikipedia.org/wiki/Rust_(programming_language)",
                "https://crates.io/?q=serde",
            ]
        );
    }

    #[test]
    fn respects_the_limit() {
        assert_eq!(parse_result_links(PAGE, 2).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn query_is_encoded_into_the_search_url() {
        let fetcher = Arc::new(StubFetcher::new(PAGE));
        let search = GoogleSearch::new(&ToolkitConfig::default(), fetcher.clone());
        let out = search
            .execute(&json!({"query": "rust lang", "num_results": 3}))
            .await
            .unwrap();

        assert_eq!(
            fetcher.requested(),
            vec!["https://www.google.com/search?q=rust%20lang&num=5&hl=en"]
        );
        assert_eq!(out.log_message, "rust lang");
        assert_eq!(out.details.len(), 3);
        assert_eq!(out.details[0], "1. https://www.rust-lang.org/");
    }

    #[tokio::test]
    async fn empty_page_reports_no_results() {
        let fetcher = Arc::new(StubFetcher::new("<html></html>"));
        let search = GoogleSearch::new(&ToolkitConfig::default(), fetcher);
        let out = search
            .execute(&json!({"query": "zzz", "num_results": 5}))
            .await
            .unwrap();
        assert_eq!(out.headline, "No results found.");
        assert!(out.details.is_empty());
    }
}
