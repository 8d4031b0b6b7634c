//! "Post on Twitter (X)".

use super::{str_arg, ToolHandler};
use crate::clients::oauth::OAuthCredentials;
use crate::clients::twitter::{truncate_tweet, MAX_TWEET_CHARS};
use crate::clients::{HttpSettings, TwitterClient};
use crate::config::ToolkitConfig;
use crate::types::{InputField, ToolOutput};
use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

pub struct TwitterPoster {
    api_url: String,
    http: HttpSettings,
}

impl TwitterPoster {
    pub fn new(config: &ToolkitConfig, http: HttpSettings) -> Self {
        Self {
            api_url: config.twitter_api_url.clone(),
            http,
        }
    }
}

#[async_trait]
impl ToolHandler for TwitterPoster {
    fn entrypoint(&self) -> &str {
        "twitter_poster"
    }

    fn title(&self) -> &str {
        "Twitter Poster"
    }

    fn notes(&self) -> &[&str] {
        &["Twitter/X developer credentials required: https://developer.twitter.com/"]
    }

    fn fields(&self) -> Vec<InputField> {
        vec![
            InputField::text("api_key", "API Key"),
            InputField::secret("api_secret", "API Secret"),
            InputField::text("access_token", "Access Token"),
            InputField::secret("access_secret", "Access Token Secret"),
            InputField::multiline("tweet", "Tweet (max 280 chars)"),
        ]
    }

    fn action_label(&self) -> &str {
        "Post Tweet"
    }

    async fn execute(&self, params: &serde_json::Value) -> Result<ToolOutput> {
        let credentials = OAuthCredentials {
            consumer_key: str_arg(params, "api_key")?.to_string(),
            consumer_secret: str_arg(params, "api_secret")?.to_string(),
            token: str_arg(params, "access_token")?.to_string(),
            token_secret: str_arg(params, "access_secret")?.to_string(),
        };

        let (tweet, truncated) = truncate_tweet(str_arg(params, "tweet")?);
        if truncated {
            warn!("Tweet longer than {} characters, truncated", MAX_TWEET_CHARS);
        }

        let client = TwitterClient::new(&self.api_url, credentials, self.http.clone());
        let posted = client.post_tweet(&tweet).await?;

        let mut out = ToolOutput::new(
            "Tweet posted.",
            tweet.chars().take(50).collect::<String>(),
        )
        .detail(format!("Tweet ID: {}", posted.id))
        .detail(format!("Tweet content: {}", posted.text));
        if truncated {
            out = out.detail(format!("Truncated to {} characters.", MAX_TWEET_CHARS));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::stub_server::StubServer;
    use serde_json::json;

    fn poster_at(server: &StubServer) -> TwitterPoster {
        let config = ToolkitConfig {
            twitter_api_url: server.url.clone(),
            ..ToolkitConfig::default()
        };
        TwitterPoster::new(&config, HttpSettings::default())
    }

    fn params(tweet: &str) -> serde_json::Value {
        json!({
            "api_key": "ck", "api_secret": "cs",
            "access_token": "tk", "access_secret": "ts",
            "tweet": tweet
        })
    }

    #[tokio::test]
    async fn posted_tweet_reports_id_and_content() {
        let server = StubServer::start(201, r#"{"data": {"id": "42", "text": "gm"}}"#).await;
        let out = poster_at(&server).execute(&params("gm")).await.unwrap();

        assert_eq!(out.headline, "Tweet posted.");
        assert_eq!(out.details, vec!["Tweet ID: 42", "Tweet content: gm"]);
        assert_eq!(out.log_message, "gm");
    }

    #[tokio::test]
    async fn long_tweets_are_cut_before_posting() {
        let server = StubServer::start(201, r#"{"data": {"id": "43", "text": "x"}}"#).await;
        let out = poster_at(&server)
            .execute(&params(&"a".repeat(300)))
            .await
            .unwrap();

        let sent = server.single().json()["text"].as_str().unwrap().to_string();
        assert_eq!(sent.chars().count(), MAX_TWEET_CHARS);
        assert_eq!(out.log_message.chars().count(), 50);
        assert_eq!(out.details.last().unwrap(), "Truncated to 280 characters.");
    }

    #[tokio::test]
    async fn rejected_credentials_keep_the_remote_detail() {
        let body = r#"{"title":"Unauthorized","status":401,"detail":"Unauthorized"}"#;
        let server = StubServer::start(401, body).await;
        let err = poster_at(&server).execute(&params("gm")).await.unwrap_err();
        assert!(err.to_string().contains(body));
    }
}
