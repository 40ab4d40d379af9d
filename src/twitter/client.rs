//! Twitter API client trait and its HTTP implementation.
//!
//! The reply gate talks to Twitter through the [`TwitterClient`] trait so the
//! gating logic can be exercised against a scripted client in tests. The
//! production implementation speaks the Twitter API v2 over reqwest using
//! OAuth 2.0 User Context authentication.

use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::Client;
use serde_json::json;

use crate::oauth::build_oauth2_user_context_header;

use super::error::{TwitterError, TwitterResult};

/// Base URL of the Twitter API.
const DEFAULT_API_URL: &str = "https://api.x.com";

/// A recent tweet mentioning the configured account.
#[derive(Debug, Clone)]
pub struct Mention {
    /// Numeric-string tweet ID.
    pub tweet_id: String,
    /// Username of the tweet's author, without the `@` prefix.
    pub username: String,
    /// Full tweet text.
    pub text: String,
    /// BCP-47 language code Twitter detected for the tweet, if any.
    pub lang: Option<String>,
}

/// The Twitter operations the reply gate depends on.
///
/// Implementations must be `Send + Sync`; the gate is shared between the
/// HTTP handlers and the scheduled mention poll.
#[async_trait]
pub trait TwitterClient: Send + Sync {
    /// Checks that the configured credentials are accepted by the API.
    async fn verify_credentials(&self) -> TwitterResult<()>;

    /// Posts `text` as a reply to the tweet with ID `in_reply_to_status_id`.
    async fn update_status(&self, text: &str, in_reply_to_status_id: &str) -> TwitterResult<()>;

    /// Searches recent tweets mentioning `screen_name`.
    async fn search_mentions(&self, screen_name: &str) -> TwitterResult<Vec<Mention>>;
}

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// This function:
/// - Truncates long text to prevent log flooding
/// - Replaces control characters that could manipulate log output
/// - Escapes newlines to prevent log injection
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' => ' ',
            '\r' => ' ',
            '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.len() > max_len {
        format!(
            "{}... [truncated, {} total bytes]",
            &sanitized[..max_len],
            text.len()
        )
    } else {
        sanitized
    }
}

/// Production Twitter client over the API v2 REST endpoints.
pub struct HttpTwitterClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl HttpTwitterClient {
    /// Creates a client against the public Twitter API.
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(access_token, DEFAULT_API_URL.to_string())
    }

    /// Creates a client against an alternative base URL.
    pub fn with_base_url(access_token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    /// Consumes a response, mapping non-success statuses onto [`TwitterError::Api`].
    async fn check_response(
        response: reqwest::Response,
        operation_name: &str,
    ) -> TwitterResult<String> {
        let status = response.status();
        info!(
            "Received response with status: {} for operation: {}",
            status, operation_name
        );

        let body = response.text().await?;
        if status.is_success() {
            debug!(
                "Response summary for '{}': {} bytes received",
                operation_name,
                body.len()
            );
            Ok(body)
        } else {
            error!("Operation '{}' failed - Status: {}", operation_name, status);
            debug!(
                "Error response for '{}': {}",
                operation_name,
                sanitize_for_logging(&body, 200)
            );
            Err(TwitterError::Api {
                status: status.as_u16(),
                message: sanitize_for_logging(&body, 200),
            })
        }
    }
}

#[async_trait]
impl TwitterClient for HttpTwitterClient {
    /// Checks the access token against the `GET /2/users/me` endpoint.
    ///
    /// A single pass-through: any error from the API rejects unchanged, with
    /// no retry or classification.
    async fn verify_credentials(&self) -> TwitterResult<()> {
        let url = format!("{}/2/users/me", self.base_url);
        info!("Verifying Twitter credentials against {}", url);

        let auth_header = build_oauth2_user_context_header(&self.access_token);
        let response = self
            .client
            .get(&url)
            .header("Authorization", auth_header)
            .send()
            .await?;

        Self::check_response(response, "verify_credentials").await?;
        info!("Twitter credentials verified successfully");
        Ok(())
    }

    /// Posts a reply tweet via the `POST /2/tweets` endpoint.
    ///
    /// The reply relationship is carried in the payload's
    /// `reply.in_reply_to_tweet_id` field, per the API v2 contract.
    async fn update_status(&self, text: &str, in_reply_to_status_id: &str) -> TwitterResult<()> {
        let url = format!("{}/2/tweets", self.base_url);
        info!(
            "Sending reply to tweet {} ({} characters)",
            in_reply_to_status_id,
            text.chars().count()
        );

        let payload = json!({
            "text": text,
            "reply": {
                "in_reply_to_tweet_id": in_reply_to_status_id
            }
        });
        debug!("Reply payload: {}", payload);

        let auth_header = build_oauth2_user_context_header(&self.access_token);
        let response = self
            .client
            .post(&url)
            .header("Authorization", auth_header)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        Self::check_response(response, "update_status").await?;
        Ok(())
    }

    /// Searches recent tweets mentioning `screen_name` via
    /// `GET /2/tweets/search/recent`.
    ///
    /// Author usernames are resolved from the expanded `includes.users`
    /// objects; tweets whose author cannot be resolved are skipped.
    async fn search_mentions(&self, screen_name: &str) -> TwitterResult<Vec<Mention>> {
        let url = format!("{}/2/tweets/search/recent", self.base_url);
        let query = format!("@{}", screen_name);
        info!("Searching recent mentions of @{}", screen_name);

        let auth_header = build_oauth2_user_context_header(&self.access_token);
        let response = self
            .client
            .get(&url)
            .header("Authorization", auth_header)
            .query(&[
                ("query", query.as_str()),
                ("tweet.fields", "lang,author_id"),
                ("expansions", "author_id"),
                ("user.fields", "username"),
                ("max_results", "25"),
            ])
            .send()
            .await?;

        let body = Self::check_response(response, "search_mentions").await?;
        let json_response: serde_json::Value = serde_json::from_str(&body)?;

        // Map author IDs to usernames from the expanded user objects
        let mut usernames = std::collections::HashMap::new();
        if let Some(users) = json_response
            .get("includes")
            .and_then(|includes| includes.get("users"))
            .and_then(|users| users.as_array())
        {
            for user in users {
                if let (Some(id), Some(username)) = (
                    user.get("id").and_then(|v| v.as_str()),
                    user.get("username").and_then(|v| v.as_str()),
                ) {
                    usernames.insert(id.to_string(), username.to_string());
                }
            }
        }

        let mut mentions = Vec::new();
        if let Some(tweets) = json_response.get("data").and_then(|data| data.as_array()) {
            info!("Found {} mention(s) of @{}", tweets.len(), screen_name);
            for tweet in tweets {
                let (Some(id), Some(text)) = (
                    tweet.get("id").and_then(|v| v.as_str()),
                    tweet.get("text").and_then(|v| v.as_str()),
                ) else {
                    continue;
                };

                let author_id = tweet.get("author_id").and_then(|v| v.as_str());
                let Some(username) = author_id.and_then(|id| usernames.get(id)) else {
                    warn!("Skipping mention {} with unresolvable author", id);
                    continue;
                };

                mentions.push(Mention {
                    tweet_id: id.to_string(),
                    username: username.clone(),
                    text: text.to_string(),
                    lang: tweet
                        .get("lang")
                        .and_then(|v| v.as_str())
                        .map(str::to_string),
                });
            }
        } else {
            info!("No mentions of @{} found", screen_name);
        }

        Ok(mentions)
    }
}
