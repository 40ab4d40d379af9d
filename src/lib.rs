//! # Floodgate Library
//!
//! A Rust service library that gates automated reply tweets for a
//! disaster-reporting pipeline. The service resolves localized message text
//! by language-code fallback, validates at startup that every configured
//! message fits Twitter's length limit once URLs are shortened and the
//! optional timestamp is appended, verifies Twitter/X API credentials, and
//! sends reply tweets with username blacklisting and rate-limit backoff.
//!
//! ## Features
//!
//! - Localized message catalog with per-tweet language fallback
//! - Startup tweet-length validation with URL-aware accounting
//! - Twitter/X API v2 integration with OAuth 2.0 User Context authentication
//! - Reply gate with blacklist and 15-minute rate-limit cooldown
//! - Scheduled mention poll that invites reporters in their own language
//! - HTTP server with `/`, `/health`, and `POST /reply` endpoints
//! - Comprehensive test suite against a scripted Twitter client
//!
//! ## Configuration
//!
//! The following configuration is required:
//! - `FLOODGATE_CONFIG`: Path to the JSON configuration file (defaults to `./floodgate.json`)
//! - `FLOODGATE_ACCESS_TOKEN`: Twitter API Access Token (OAuth 2.0 User Context)
//! - `PORT`: Server port (defaults to 3000)
//!
//! ## API Endpoints
//!
//! - `GET /`: Returns a banner message
//! - `GET /health`: Returns service health status and send-path state
//! - `POST /reply`: Sends a localized reply tweet through the gate

pub mod config;
pub mod cronjob;
pub mod handlers;
pub mod messages;
pub mod oauth;
pub mod twitter;
pub mod validation;

// Re-export commonly used types and functions
pub use config::{get_server_port, load_access_token, Config, TwitterSection};
pub use cronjob::start_mention_cronjob;
pub use handlers::{handle_health, handle_reply, handle_root, ReplyRequest};
pub use messages::MessageCatalog;
pub use oauth::build_oauth2_user_context_header;
pub use twitter::{
    tweet_id_from_activity, HttpTwitterClient, MessageGate, Mention, ReplyError, ReplyOutcome,
    TwitterClient, TwitterError,
};
pub use validation::{check_message_lengths, MessageLengthError};
