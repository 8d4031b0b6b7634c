//! Twitter/X v2 client for posting tweets with user-context OAuth 1.0a.

use super::oauth::{self, OAuthCredentials};
use super::{ensure_success, HttpSettings};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum tweet length in characters.
pub const MAX_TWEET_CHARS: usize = 280;

#[derive(Debug, Clone)]
pub struct TwitterClient {
    base_url: String,
    credentials: OAuthCredentials,
    settings: HttpSettings,
}

#[derive(Debug, Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: TweetData,
}

#[derive(Debug, Deserialize)]
pub struct TweetData {
    pub id: String,
    pub text: String,
}

impl TwitterClient {
    pub fn new(base_url: &str, credentials: OAuthCredentials, settings: HttpSettings) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            settings,
        }
    }

    /// Post a tweet and return the created tweet.
    pub async fn post_tweet(&self, text: &str) -> Result<TweetData> {
        let url = format!("{}/2/tweets", self.base_url);
        let auth = oauth::authorization_header(
            &self.credentials,
            "POST",
            &url,
            &[],
            &oauth::nonce(),
            chrono::Utc::now().timestamp(),
        )?;
        debug!("Posting tweet ({} chars)", text.chars().count());

        let resp = self
            .settings
            .client()?
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&CreateTweetRequest { text })
            .send()
            .await
            .context("Twitter request failed")?;
        let resp = ensure_success("Twitter", resp).await?;

        let body: CreateTweetResponse = resp
            .json()
            .await
            .context("Failed to parse Twitter response")?;
        Ok(body.data)
    }
}

/// Cut text to the tweet limit on a character boundary.
pub fn truncate_tweet(text: &str) -> (String, bool) {
    if text.chars().count() <= MAX_TWEET_CHARS {
        (text.to_string(), false)
    } else {
        (text.chars().take(MAX_TWEET_CHARS).collect(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::stub_server::StubServer;

    fn credentials() -> OAuthCredentials {
        OAuthCredentials {
            consumer_key: "ck".into(),
            consumer_secret: "cs".into(),
            token: "tk".into(),
            token_secret: "ts".into(),
        }
    }

    #[test]
    fn short_tweets_are_untouched() {
        assert_eq!(truncate_tweet("hello"), ("hello".to_string(), false));
    }

    #[test]
    fn long_tweets_cut_on_characters() {
        let text = "é".repeat(300);
        let (cut, truncated) = truncate_tweet(&text);
        assert!(truncated);
        assert_eq!(cut.chars().count(), MAX_TWEET_CHARS);
    }

    #[tokio::test]
    async fn tweet_is_signed_and_decoded() {
        let server =
            StubServer::start(201, r#"{"data": {"id": "1799", "text": "hello world"}}"#).await;
        let client = TwitterClient::new(&server.url, credentials(), HttpSettings::default());

        let tweet = client.post_tweet("hello world").await.unwrap();
        assert_eq!(tweet.id, "1799");
        assert_eq!(tweet.text, "hello world");

        let req = server.single();
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/2/tweets");
        assert_eq!(req.json(), serde_json::json!({"text": "hello world"}));
        let auth = req.header("authorization");
        assert!(auth.starts_with("OAuth oauth_consumer_key=\"ck\""));
        assert!(auth.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(auth.contains("oauth_token=\"tk\""));
    }

    #[tokio::test]
    async fn forbidden_tweet_reports_the_remote_detail() {
        let body = r#"{"title":"Forbidden","detail":"Tweet with duplicate content."}"#;
        let server = StubServer::start(403, body).await;
        let client = TwitterClient::new(&server.url, credentials(), HttpSettings::default());

        let err = client.post_tweet("again").await.unwrap_err();
        assert!(err.to_string().contains("Twitter request failed (403 Forbidden)"));
        assert!(err.to_string().contains("duplicate content"));
    }

    #[tokio::test]
    async fn unexpected_success_body_is_a_parse_error() {
        let server = StubServer::start(200, r#"{"errors": []}"#).await;
        let client = TwitterClient::new(&server.url, credentials(), HttpSettings::default());

        let err = client.post_tweet("hi").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse Twitter response");
    }
}
