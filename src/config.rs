//! Configuration module for the floodgate service.
//!
//! This module contains the configuration structures for the Twitter-facing
//! reply gate. The `twitter` section is deserialized from a JSON file whose
//! shape matches the deployed pipeline configuration: a handful of scalar
//! settings alongside named message-groups of per-language tweet texts.

use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;

use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::Value;

/// Default path of the JSON configuration file when `FLOODGATE_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "./floodgate.json";

/// Top-level service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Twitter reply-gate settings and message catalog source.
    pub twitter: TwitterSection,
}

/// The `twitter` section of the configuration file.
///
/// Known scalar settings are typed fields; everything else in the section is
/// collected into `messages`. Message-groups are the object-valued entries of
/// that map (language code to candidate tweet text); scalar leftovers are
/// tolerated and ignored, matching the deployed configuration format where
/// both kinds of property share the section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TwitterSection {
    /// Language code used when none of a tweet's codes resolve to a message.
    #[serde(rename = "defaultLanguage")]
    pub default_language: Option<String>,
    /// Display length Twitter substitutes for each shortened URL.
    pub url_length: Option<usize>,
    /// Whether outgoing replies carry a trailing epoch-seconds timestamp.
    #[serde(rename = "addTimestamp")]
    pub add_timestamp: bool,
    /// Comma-separated usernames that must never receive automated replies.
    #[serde(rename = "usernameReplyBlacklist")]
    pub username_reply_blacklist: Option<String>,
    /// Master switch for the outgoing network call.
    pub send_enabled: bool,
    /// The account's screen name, used by the mention poll.
    #[serde(rename = "screenName")]
    pub screen_name: Option<String>,
    /// Remaining section entries: message-groups plus any scalar leftovers.
    #[serde(flatten)]
    pub messages: HashMap<String, Value>,
}

impl TwitterSection {
    /// Iterates the object-valued entries of the section, i.e. the message-groups.
    ///
    /// Scalar entries (strings, numbers, booleans) are skipped; only objects
    /// mapping language codes to candidate tweet texts are yielded.
    pub fn message_groups(&self) -> impl Iterator<Item = (&str, &serde_json::Map<String, Value>)> {
        self.messages
            .iter()
            .filter_map(|(name, value)| value.as_object().map(|group| (name.as_str(), group)))
    }

    /// Parses `usernameReplyBlacklist` into a set of usernames.
    ///
    /// The configured value is split on commas and each entry is trimmed of
    /// surrounding whitespace; empty entries are dropped. Membership checks
    /// against the returned set are case-sensitive.
    ///
    /// # Returns
    ///
    /// The set of blacklisted usernames; empty when nothing is configured.
    pub fn blacklist(&self) -> HashSet<String> {
        self.username_reply_blacklist
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Config {
    /// Loads the configuration from the JSON file at `path`.
    ///
    /// # Returns
    ///
    /// - `Ok(Config)`: If the file was read and deserialized successfully
    /// - `Err(...)`: If the file is missing, unreadable, or not valid JSON
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        info!("Loading floodgate configuration from {}", path);

        let raw = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read configuration file {}: {}", path, e);
            format!("Failed to read configuration file {}: {}", path, e)
        })?;

        let config: Config = serde_json::from_str(&raw).map_err(|e| {
            error!("Failed to parse configuration file {}: {}", path, e);
            format!("Failed to parse configuration file {}: {}", path, e)
        })?;

        let group_count = config.twitter.message_groups().count();
        info!(
            "Configuration loaded: {} message group(s), send_enabled={}, addTimestamp={}",
            group_count, config.twitter.send_enabled, config.twitter.add_timestamp
        );
        if config.twitter.default_language.is_none() {
            warn!("No defaultLanguage configured - messages with unknown language codes will not resolve");
        }

        Ok(config)
    }

    /// Loads the configuration from the path named by `FLOODGATE_CONFIG`,
    /// falling back to [`DEFAULT_CONFIG_PATH`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let path = env::var("FLOODGATE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(&path)
    }
}

/// Masks a token for safe logging, keeping at most the first and last 8 characters.
fn mask_token(token: &str) -> String {
    let length = token.len();
    let prefix = if length > 8 { &token[..8] } else { token };
    if length > 16 {
        format!("{}...{}", prefix, &token[length - 8..])
    } else {
        format!("{}...", prefix)
    }
}

/// Loads the Twitter API access token from the environment.
///
/// # Required Environment Variables
///
/// - `FLOODGATE_ACCESS_TOKEN`: Twitter API Access Token (OAuth 2.0 User
///   Context, used for all operations)
///
/// # Returns
///
/// - `Ok(String)`: If the environment variable is present and non-empty
/// - `Err(...)`: If the environment variable is missing or empty
pub fn load_access_token() -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    match env::var("FLOODGATE_ACCESS_TOKEN") {
        Ok(token) => {
            let token_length = token.len();
            info!(
                "Found FLOODGATE_ACCESS_TOKEN environment variable with length: {}",
                token_length
            );
            debug!("Access token (masked): {}", mask_token(&token));

            if token.is_empty() {
                error!("Access token is empty");
                return Err("Access token cannot be empty".into());
            }
            if token_length < 10 {
                warn!(
                    "Access token seems unusually short ({} characters)",
                    token_length
                );
            }

            Ok(token)
        }
        Err(e) => {
            error!(
                "Failed to load FLOODGATE_ACCESS_TOKEN from environment: {}",
                e
            );
            error!("Make sure FLOODGATE_ACCESS_TOKEN environment variable is set");
            Err(format!("Missing FLOODGATE_ACCESS_TOKEN environment variable: {}", e).into())
        }
    }
}

/// Gets the server port from environment variables or returns the default.
///
/// This function reads the `PORT` environment variable and parses it as a u16.
/// If the environment variable is not set or cannot be parsed, it defaults to 3000.
///
/// # Returns
///
/// The port number as a u16.
///
/// # Panics
///
/// This function will panic if the `PORT` environment variable is set to a value
/// that cannot be parsed as a valid port number.
pub fn get_server_port() -> u16 {
    env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .expect("PORT must be a valid number")
}
