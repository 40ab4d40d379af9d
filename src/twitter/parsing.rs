//! Text parsing utilities for Twitter identifiers.
//!
//! Upstream activity feeds identify tweets by URN-style activity IDs such as
//! `tag:search.twitter.com,2005:5377776775`; the REST API wants the bare
//! numeric suffix. This module reduces one to the other.

/// Extracts the numeric tweet ID from an activity identifier.
///
/// Accepts either a full activity ID (everything up to the final `:` is
/// ignored) or an already-bare numeric ID, which is returned unchanged. The
/// trailing segment must be entirely numeric.
///
/// # Parameters
///
/// - `activity_id`: The activity identifier or bare tweet ID
///
/// # Returns
///
/// - `Some(id)`: The numeric-string tweet ID
/// - `None`: If the identifier does not end in a numeric segment
pub fn tweet_id_from_activity(activity_id: &str) -> Option<String> {
    let re = regex::Regex::new(r"^(?:.*:)?(\d+)$").ok()?;
    re.captures(activity_id)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
}
