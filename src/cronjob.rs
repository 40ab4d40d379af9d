//! Cronjob module for scheduled tasks.
//!
//! This module contains the periodic mention poll: every few minutes the
//! service searches recent tweets mentioning the configured screen name and
//! invites each author, in their own language where possible, to submit a
//! proper report. All sends go through the gate, so the blacklist, the
//! send_enabled switch, and the rate-limit cooldown apply here too.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use log::{error, info, warn};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::twitter::{MessageGate, ReplyOutcome};

/// Message catalog key of the invite reply sent to new reporters.
const INVITE_MESSAGE_KEY: &str = "invite_text";

/// Starts the cronjob scheduler for the periodic mention poll.
///
/// This function creates a new job scheduler and adds a job that runs every
/// 5 minutes to search for recent mentions of the configured screen name and
/// reply to each previously-unseen one with the localized invite message.
/// Tweet IDs that have already been handled are tracked in memory so a
/// mention is only ever answered once per process lifetime.
///
/// # Returns
///
/// - `Ok(JobScheduler)`: The configured job scheduler
/// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If there's an error
///   creating or configuring the scheduler
pub async fn start_mention_cronjob(
    gate: Arc<MessageGate>,
) -> Result<JobScheduler, Box<dyn std::error::Error + Send + Sync>> {
    let sched = JobScheduler::new().await?;
    let seen: Arc<Mutex<HashSet<String>>> = Arc::new(Mutex::new(HashSet::new()));

    // Create a job that runs every 5 minutes
    sched
        .add(Job::new_async("0 0/5 * * * * *", move |_uuid, _lock| {
            let gate = Arc::clone(&gate);
            let seen = Arc::clone(&seen);
            Box::pin(async move {
                poll_mentions(&gate, &seen).await;
            })
        })?)
        .await?;

    info!("Cronjob scheduler configured to poll mentions every 5 minutes");
    Ok(sched)
}

/// Runs one round of the mention poll against the gate's client.
pub(crate) async fn poll_mentions(gate: &MessageGate, seen: &Mutex<HashSet<String>>) {
    let Some(screen_name) = gate.screen_name() else {
        info!("No screenName configured, skipping mention poll");
        return;
    };

    info!("Starting scheduled poll for @{} mentions", screen_name);
    let mentions = match gate.client().search_mentions(screen_name).await {
        Ok(mentions) => mentions,
        Err(e) => {
            error!("Scheduled mention poll failed: {}", e);
            return;
        }
    };

    if mentions.is_empty() {
        info!("No mentions found to reply to");
        return;
    }
    info!("Found {} mention(s) to consider", mentions.len());

    for mention in mentions {
        // Handled tweets are marked up front; a failed send is not retried
        // on later rounds.
        {
            let mut seen = seen.lock().unwrap();
            if !seen.insert(mention.tweet_id.clone()) {
                continue;
            }
        }

        let Some(message) = gate.resolve_message(INVITE_MESSAGE_KEY, &[mention.lang.as_deref()])
        else {
            warn!(
                "No '{}' message resolvable for language {:?}, skipping tweet {}",
                INVITE_MESSAGE_KEY, mention.lang, mention.tweet_id
            );
            continue;
        };

        match gate
            .send_reply_tweet(&mention.username, &mention.tweet_id, message)
            .await
        {
            Ok(ReplyOutcome::Sent) => {
                info!(
                    "Invited @{} to report via tweet {}",
                    mention.username, mention.tweet_id
                );
            }
            Ok(ReplyOutcome::SendDisabled) => {
                info!(
                    "Sending disabled, invite for @{} (tweet {}) skipped",
                    mention.username, mention.tweet_id
                );
            }
            Err(e) => {
                error!(
                    "Failed to invite @{} (tweet {}): {}",
                    mention.username, mention.tweet_id, e
                );
            }
        }
    }

    info!("Scheduled mention poll completed");
}
