//! Twitter Credential Check Script
//!
//! This script loads the Twitter access token from the environment and runs
//! a single credential verification call against the live API, the same
//! pass-through check the service runs at startup.

use floodgate::config::load_access_token;
use floodgate::twitter::{HttpTwitterClient, TwitterClient};

#[tokio::main]
async fn main() {
    env_logger::init();

    println!("🔑 Loading Twitter access token");
    let access_token = match load_access_token() {
        Ok(token) => token,
        Err(e) => {
            eprintln!("❌ Failed to load access token: {}", e);
            std::process::exit(1);
        }
    };

    println!("🌐 Verifying credentials against the Twitter API");
    let client = HttpTwitterClient::new(access_token);
    match client.verify_credentials().await {
        Ok(()) => println!("✅ Credentials accepted"),
        Err(e) => {
            eprintln!("❌ Credential verification failed: {}", e);
            std::process::exit(1);
        }
    }
}
