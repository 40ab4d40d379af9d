//! The reply gate: every automated tweet the pipeline sends passes through here.
//!
//! The gate owns the localized message catalog, the startup length
//! validation, the credential check, and the reply sender with its username
//! blacklist and rate-limit cooldown. The Twitter client is injected as a
//! trait object; the rest of the service only ever talks to Twitter through
//! this type.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use log::{error, info, warn};
use thiserror::Error;

use crate::config::TwitterSection;
use crate::messages::MessageCatalog;
use crate::validation::{check_message_lengths, MessageLengthError};

use super::client::TwitterClient;
use super::error::{TwitterError, TwitterResult};

/// How long sending stays suspended after a rate-limit rejection.
///
/// Matches Twitter's 15-minute rate-limit window.
pub const RATE_LIMIT_COOLDOWN_MS: i64 = 15 * 60 * 1000;

/// A reply attempt that counts as forward progress for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The reply was posted to Twitter.
    Sent,
    /// Sending is disabled by configuration; the reply was skipped but the
    /// caller may proceed as if it succeeded.
    SendDisabled,
}

/// A reply attempt that must not be treated as progress.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// The recipient is on the configured reply blacklist.
    #[error("@{username} is on the reply blacklist")]
    Blacklisted { username: String },

    /// A previous rate-limit rejection is still cooling down.
    #[error("rate limited until epoch ms {until}")]
    RateLimited { until: i64 },

    /// The Twitter API rejected the send.
    #[error(transparent)]
    Api(#[from] TwitterError),
}

/// Gate for all automated Twitter traffic of the reporting pipeline.
pub struct MessageGate {
    twitter: TwitterSection,
    catalog: MessageCatalog,
    blacklist: HashSet<String>,
    client: Box<dyn TwitterClient>,
    /// Epoch milliseconds until which sending is suspended; 0 = not limited.
    /// Written only by the sender's rate-limit error path, read at the start
    /// of every send attempt, and resettable from outside.
    rate_limited_until: AtomicI64,
}

impl MessageGate {
    /// Builds a gate from the `twitter` configuration section and an injected
    /// client.
    ///
    /// The message catalog and the username blacklist are constructed once
    /// here, not re-derived per send.
    pub fn new(twitter: TwitterSection, client: Box<dyn TwitterClient>) -> Self {
        let catalog = MessageCatalog::from_section(&twitter);
        let blacklist = twitter.blacklist();
        if !blacklist.is_empty() {
            info!("Reply blacklist contains {} username(s)", blacklist.len());
        }
        Self {
            twitter,
            catalog,
            blacklist,
            client,
            rate_limited_until: AtomicI64::new(0),
        }
    }

    /// The injected Twitter client, for callers that need read operations
    /// such as the mention poll.
    pub fn client(&self) -> &dyn TwitterClient {
        self.client.as_ref()
    }

    /// The configured screen name, if any.
    pub fn screen_name(&self) -> Option<&str> {
        self.twitter.screen_name.as_deref()
    }

    /// Whether outgoing sends are enabled by configuration.
    pub fn send_enabled(&self) -> bool {
        self.twitter.send_enabled
    }

    /// The stored rate-limit expiry in epoch milliseconds (0 = not limited).
    pub fn rate_limited_until(&self) -> i64 {
        self.rate_limited_until.load(Ordering::Relaxed)
    }

    /// Overwrites the stored rate-limit expiry. Setting 0 immediately
    /// resumes sending.
    pub fn set_rate_limited_until(&self, epoch_ms: i64) {
        self.rate_limited_until.store(epoch_ms, Ordering::Relaxed);
    }

    /// Whether the gate is currently inside a rate-limit cooldown.
    pub fn is_rate_limited(&self) -> bool {
        now_ms() < self.rate_limited_until()
    }

    /// Resolves the localized text for `key` against the given language codes.
    ///
    /// See [`MessageCatalog::resolve`]; absence returns `None`, never an error.
    pub fn resolve_message(&self, key: &str, codes: &[Option<&str>]) -> Option<&str> {
        self.catalog.resolve(key, codes)
    }

    /// Validates every configured message against the tweet length budget.
    pub async fn check_message_lengths(&self) -> Result<(), MessageLengthError> {
        check_message_lengths(&self.twitter).await
    }

    /// Checks the configured credentials against the Twitter API.
    ///
    /// A single pass-through to the client; any error rejects unchanged.
    pub async fn verify_credentials(&self) -> TwitterResult<()> {
        self.client.verify_credentials().await
    }

    /// Sends `message` as a reply to `tweet_id`, addressed to `username`.
    ///
    /// The gate checks, in order: the username blacklist, the send_enabled
    /// switch, and the rate-limit cooldown. When all pass, the outgoing text
    /// is composed (with the epoch-seconds timestamp suffix when configured)
    /// and handed to the client with `in_reply_to_status_id = tweet_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(ReplyOutcome::Sent)`: The reply was posted
    /// - `Ok(ReplyOutcome::SendDisabled)`: Sending is disabled; treated as success
    /// - `Err(ReplyError::Blacklisted)`: The recipient must never be replied to
    /// - `Err(ReplyError::RateLimited)`: Inside the cooldown window; nothing sent
    /// - `Err(ReplyError::Api)`: The API rejected the send; a rate-limit
    ///   status additionally starts the cooldown
    pub async fn send_reply_tweet(
        &self,
        username: &str,
        tweet_id: &str,
        message: &str,
    ) -> Result<ReplyOutcome, ReplyError> {
        if self.blacklist.contains(username) {
            warn!(
                "Not sending reply to blacklisted username @{} for tweet {}",
                username, tweet_id
            );
            return Err(ReplyError::Blacklisted {
                username: username.to_string(),
            });
        }

        if !self.twitter.send_enabled {
            info!(
                "Sending is disabled, not replying to @{} for tweet {}",
                username, tweet_id
            );
            return Ok(ReplyOutcome::SendDisabled);
        }

        let until = self.rate_limited_until();
        if now_ms() < until {
            warn!(
                "Currently rate limited until epoch ms {}, not replying to @{} for tweet {}",
                until, username, tweet_id
            );
            return Err(ReplyError::RateLimited { until });
        }

        let text = if self.twitter.add_timestamp {
            format!("{} {}", message, Utc::now().timestamp())
        } else {
            message.to_string()
        };

        match self.client.update_status(&text, tweet_id).await {
            Ok(()) => {
                info!("Reply to tweet {} for @{} sent", tweet_id, username);
                Ok(ReplyOutcome::Sent)
            }
            Err(e) => {
                error!(
                    "Failed to send reply to tweet {} for @{}: {}",
                    tweet_id, username, e
                );
                if e.is_rate_limit() {
                    let until = now_ms() + RATE_LIMIT_COOLDOWN_MS;
                    self.set_rate_limited_until(until);
                    warn!(
                        "Twitter is rate limiting sends, suspending replies until epoch ms {}",
                        until
                    );
                }
                Err(ReplyError::Api(e))
            }
        }
    }
}

/// Current time in epoch milliseconds.
fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
