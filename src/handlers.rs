//! HTTP route handlers for the floodgate service.
//!
//! This module contains all the HTTP route handler functions that process
//! incoming requests and return appropriate responses. The reply endpoint is
//! the manual counterpart of the scheduled mention poll: it drives the same
//! gate with an operator-supplied recipient and message key.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::twitter::{tweet_id_from_activity, MessageGate, ReplyError, ReplyOutcome};

/// Handles GET requests to the root `/` endpoint.
///
/// This endpoint returns a simple banner message and logs the request.
/// It's primarily used to confirm the service is reachable.
///
/// # Returns
///
/// A static banner string.
pub async fn handle_root() -> &'static str {
    info!("Floodgate banner requested");
    "Floodgate is holding the line!"
}

/// Handles GET requests to the `/health` endpoint.
///
/// This endpoint provides a health check for the service, returning the
/// current status, the service name, and the state of the outgoing send
/// path. It's commonly used by load balancers and monitoring systems to
/// verify that the service is running and responsive.
///
/// # Returns
///
/// A JSON response containing:
/// - `status`: Always "healthy" when the service is running
/// - `service`: The service name "floodgate"
/// - `sending`: "ok", "disabled", or "rate_limited"
pub async fn handle_health(State(gate): State<Arc<MessageGate>>) -> Json<Value> {
    let sending = if !gate.send_enabled() {
        "disabled"
    } else if gate.is_rate_limited() {
        "rate_limited"
    } else {
        "ok"
    };
    Json(json!({"status": "healthy", "service": "floodgate", "sending": sending}))
}

/// Request body for the `POST /reply` endpoint.
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    /// Recipient username, without the `@` prefix.
    pub username: String,
    /// Activity identifier or bare numeric ID of the tweet being replied to.
    pub tweet_id: String,
    /// Message catalog key of the reply text.
    pub message_key: String,
    /// Language codes to try, in preference order.
    #[serde(default)]
    pub language_codes: Vec<String>,
}

/// Handles POST requests to the `/reply` endpoint.
///
/// Resolves the localized reply text for the requested message key and sends
/// it through the gate as a reply to the given tweet.
///
/// # Returns
///
/// - `Ok(Json<Value>)`: The reply was sent, or sending is disabled (a no-op success)
/// - `Err((StatusCode, Json<Value>))`: Bad identifiers, unresolvable message
///   keys, blacklisted recipients, active rate limiting, or API failures
pub async fn handle_reply(
    State(gate): State<Arc<MessageGate>>,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(tweet_id) = tweet_id_from_activity(&request.tweet_id) else {
        warn!("Rejecting reply request with bad tweet ID: {}", request.tweet_id);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "tweet_id is not a tweet identifier"})),
        ));
    };

    let codes: Vec<Option<&str>> = request
        .language_codes
        .iter()
        .map(|code| Some(code.as_str()))
        .collect();
    let Some(message) = gate.resolve_message(&request.message_key, &codes) else {
        warn!(
            "No message resolvable for key '{}' with languages {:?}",
            request.message_key, request.language_codes
        );
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "message key does not resolve"})),
        ));
    };
    let message = message.to_string();

    match gate
        .send_reply_tweet(&request.username, &tweet_id, &message)
        .await
    {
        Ok(ReplyOutcome::Sent) => {
            info!("Reply sent to @{} for tweet {}", request.username, tweet_id);
            Ok(Json(
                json!({"status": "success", "message": "Reply sent", "outcome": "sent"}),
            ))
        }
        Ok(ReplyOutcome::SendDisabled) => {
            info!(
                "Sending disabled, reply to @{} for tweet {} skipped",
                request.username, tweet_id
            );
            Ok(Json(json!({
                "status": "success",
                "message": "Sending is disabled, reply skipped",
                "outcome": "send_disabled"
            })))
        }
        Err(e @ ReplyError::Blacklisted { .. }) => Err((
            StatusCode::FORBIDDEN,
            Json(json!({"status": "error", "message": e.to_string()})),
        )),
        Err(e @ ReplyError::RateLimited { .. }) => Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"status": "error", "message": e.to_string()})),
        )),
        Err(ReplyError::Api(e)) => {
            error!("Failed to send reply: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "message": "Failed to send reply", "error": e.to_string()})),
            ))
        }
    }
}
