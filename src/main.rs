//! # Floodgate
//!
//! A Rust service that gates automated reply tweets for a disaster-reporting
//! pipeline. At startup the service validates that every configured message
//! fits Twitter's length limit and that the API credentials are accepted;
//! it then serves the HTTP surface and polls for mentions on a schedule.
//!
//! ## Environment Variables
//!
//! - `FLOODGATE_CONFIG`: Path to the JSON configuration file (defaults to `./floodgate.json`)
//! - `FLOODGATE_ACCESS_TOKEN`: Twitter API Access Token (OAuth 2.0 User Context)
//! - `PORT`: Server port (defaults to 3000)
//!
//! ## API Endpoints
//!
//! - `GET /`: Returns a banner message
//! - `GET /health`: Returns service health status and send-path state
//! - `POST /reply`: Sends a localized reply tweet through the gate

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use log::{error, info};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use floodgate::config::{get_server_port, load_access_token, Config};
use floodgate::cronjob::start_mention_cronjob;
use floodgate::handlers::{handle_health, handle_reply, handle_root};
use floodgate::twitter::{HttpTwitterClient, MessageGate};

/// Main entry point for the floodgate service.
///
/// Initializes logging, loads configuration and credentials, runs the
/// startup validation (message lengths, then credentials), and starts the
/// HTTP server alongside the mention-poll cronjob. The server runs
/// indefinitely until terminated.
#[tokio::main]
async fn main() {
    // Initialize the logging system
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let access_token = match load_access_token() {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to load Twitter credentials: {}", e);
            std::process::exit(1);
        }
    };

    let client = HttpTwitterClient::new(access_token);
    let gate = Arc::new(MessageGate::new(config.twitter, Box::new(client)));

    // Startup validation: refuse to run with oversized messages or bad credentials
    if let Err(e) = gate.check_message_lengths().await {
        error!("Configured messages failed length validation: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = gate.verify_credentials().await {
        error!("Twitter credential verification failed: {}", e);
        std::process::exit(1);
    }
    info!("Startup validation passed");

    // Start the cronjob scheduler for the mention poll
    let cron_gate = Arc::clone(&gate);
    let cronjob_handle = tokio::spawn(async move {
        match start_mention_cronjob(cron_gate).await {
            Ok(scheduler) => {
                info!("Starting mention poll cronjob");
                if let Err(e) = scheduler.start().await {
                    log::error!("Failed to start cronjob scheduler: {}", e);
                    return;
                }
                // Keep the scheduler running indefinitely
                loop {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                }
            }
            Err(e) => {
                log::error!("Failed to create cronjob scheduler: {}", e);
            }
        }
    });

    // Build the HTTP application with all routes and middleware
    let app = Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/reply", post(handle_reply))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(gate);

    // Get the server port and bind address
    let port = get_server_port();
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    info!("Starting floodgate server on {}", addr);

    // Bind to the address and start serving requests
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Run both the HTTP server and cronjob concurrently
    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                log::error!("HTTP server error: {}", e);
            }
        }
        _ = cronjob_handle => {
            log::info!("Cronjob task completed");
        }
    }
}
