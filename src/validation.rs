//! Tweet length validation for configured message-groups.
//!
//! Every candidate reply text in the configuration must fit Twitter's
//! single-message cap once URLs are replaced by their shortened display
//! length, leaving room for the `@recipient ` prefix and, when enabled, the
//! trailing timestamp the sender appends. The whole catalog is validated at
//! startup so a misconfigured translation is caught before any tweet is sent.

use log::{debug, info};
use thiserror::Error;

use crate::config::TwitterSection;

/// Twitter's classic single-message character cap.
pub const TWITTER_MAX_LENGTH: usize = 140;

/// Characters reserved for the reply recipient: `@` + 15-character username + space.
pub const MENTION_ALLOWANCE: usize = 17;

/// Characters reserved for the optional suffix: space + 10-digit epoch-seconds timestamp.
pub const TIMESTAMP_ALLOWANCE: usize = 11;

/// Pattern matching HTTP/HTTPS URL substrings inside a message.
const URL_PATTERN: &str = r"https?://\S+";

/// A configured message exceeds the reply budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "message '{group}.{language}' is {effective} effective characters, over the {budget} character reply budget"
)]
pub struct MessageLengthError {
    /// Name of the offending message-group.
    pub group: String,
    /// Language code of the offending message.
    pub language: String,
    /// Effective character count after URL substitution.
    pub effective: usize,
    /// The budget the message had to fit in.
    pub budget: usize,
}

/// The character budget available to a message body.
///
/// The classic cap minus the recipient mention, minus the timestamp suffix
/// when `addTimestamp` is configured.
pub fn reply_budget(add_timestamp: bool) -> usize {
    let mut budget = TWITTER_MAX_LENGTH - MENTION_ALLOWANCE;
    if add_timestamp {
        budget -= TIMESTAMP_ALLOWANCE;
    }
    budget
}

/// Effective character count of a message once URLs are shortened.
///
/// Each `http(s)://…` substring counts as `url_length` characters instead of
/// its literal length. When `url_length` is not configured, URLs count
/// literally.
fn effective_length(message: &str, url_length: Option<usize>) -> usize {
    let mut length = message.chars().count();

    if let Some(url_length) = url_length {
        if let Ok(re) = regex::Regex::new(URL_PATTERN) {
            for url in re.find_iter(message) {
                length = length - url.as_str().chars().count() + url_length;
            }
        }
    }

    length
}

/// Validates every configured message against the reply budget.
///
/// Only object-valued entries of the `twitter` section are treated as
/// message-groups; scalar properties are ignored. The check itself is plain
/// arithmetic, but it is exposed as an async function because callers compose
/// it with the credential check during startup validation.
///
/// # Returns
///
/// - `Ok(())`: Every message in every group fits
/// - `Err(MessageLengthError)`: The first oversized message found, naming its
///   group and language
pub async fn check_message_lengths(twitter: &TwitterSection) -> Result<(), MessageLengthError> {
    let budget = reply_budget(twitter.add_timestamp);

    for (group_name, group) in twitter.message_groups() {
        for (language, value) in group {
            let Some(message) = value.as_str() else {
                continue;
            };

            let effective = effective_length(message, twitter.url_length);
            debug!(
                "Message '{}.{}': {} effective characters (budget {})",
                group_name, language, effective, budget
            );

            if effective > budget {
                return Err(MessageLengthError {
                    group: group_name.to_string(),
                    language: language.clone(),
                    effective,
                    budget,
                });
            }
        }
    }

    info!(
        "All configured messages fit within the {} character reply budget",
        budget
    );
    Ok(())
}
