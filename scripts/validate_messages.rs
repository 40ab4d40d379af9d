//! Message Length Validation Script
//!
//! This script loads the floodgate configuration and validates every
//! configured message-group against the tweet reply budget, the same check
//! the service runs at startup. Run it after editing translations to catch
//! oversized messages before deploying.

use floodgate::config::Config;
use floodgate::validation::{check_message_lengths, reply_budget};

#[tokio::main]
async fn main() {
    env_logger::init();

    println!("🔍 Loading floodgate configuration");
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let group_count = config.twitter.message_groups().count();
    println!("📋 Found {} message group(s)", group_count);
    println!(
        "📏 Reply budget is {} characters (addTimestamp: {})",
        reply_budget(config.twitter.add_timestamp),
        config.twitter.add_timestamp
    );

    match check_message_lengths(&config.twitter).await {
        Ok(()) => println!("✅ All messages fit within the reply budget"),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
