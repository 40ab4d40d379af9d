//! Twitter/X API integration module.
//!
//! This module contains the client trait and its HTTP implementation, the
//! typed Twitter errors, tweet-identifier parsing, and the reply gate that
//! the rest of the service sends tweets through.

mod client;
mod error;
mod gate;
mod parsing;

// Re-export public API
pub use client::{HttpTwitterClient, Mention, TwitterClient};
pub use error::{TwitterError, TwitterResult};
pub use gate::{MessageGate, ReplyError, ReplyOutcome, RATE_LIMIT_COOLDOWN_MS};
pub use parsing::tweet_id_from_activity;

// Crate-internal re-exports (used by tests and other modules)
#[allow(unused_imports)]
pub(crate) use client::sanitize_for_logging;
