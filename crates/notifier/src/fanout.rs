//! Ride fan-out pipeline.
//!
//! Converts one ride-created event into zero-or-more push deliveries:
//! 1. Query the user directory for records with a push token
//! 2. Drop the creator and any record without a usable token
//! 3. Short-circuit when nobody is left
//! 4. Build the notification message
//! 5. Dispatch once through the multicast transport

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use ridecast_common::types::{
    FanoutOutcome, FanoutStage, PushMessage, RideEvent, SkipReason, UserRecord,
};

use crate::directory::UserDirectory;
use crate::transport::PushTransport;

/// Title of every ride notification.
pub const NOTIFICATION_TITLE: &str = "New Ride Available! 🚗";

/// Body phrase used when the ride has no destination.
pub const FALLBACK_DESTINATION: &str = "A new ride was posted!";

/// Fan-out notifier over an injected directory and transport.
///
/// Stateless and re-entrant: independent events may be handled concurrently
/// on separate invocations. Event delivery is at-least-once; a redelivered
/// event simply sends again, since no dedup or receipt state is kept.
pub struct FanoutNotifier {
    directory: Arc<dyn UserDirectory>,
    transport: Arc<dyn PushTransport>,
}

impl FanoutNotifier {
    pub fn new(directory: Arc<dyn UserDirectory>, transport: Arc<dyn PushTransport>) -> Self {
        Self {
            directory,
            transport,
        }
    }

    /// Handle one ride-created event end to end.
    ///
    /// Infallible by contract: directory and dispatch errors are logged and
    /// folded into the returned outcome so the trigger can always
    /// acknowledge success. Failing the trigger would make the event
    /// infrastructure redeliver and amplify the notification storm.
    pub async fn handle_ride_created(&self, event: &RideEvent) -> FanoutOutcome {
        let span = tracing::info_span!(
            "ride_fanout",
            invocation_id = %Uuid::new_v4(),
            ride_id = %event.ride_id,
            creator_id = %event.creator_id,
        );
        self.run(event).instrument(span).await
    }

    async fn run(&self, event: &RideEvent) -> FanoutOutcome {
        let users = match self.directory.users_with_push_tokens().await {
            Ok(users) => users,
            Err(e) => {
                tracing::error!(error = %e, "User directory query failed");
                return FanoutOutcome::Failed {
                    stage: FanoutStage::DirectoryQuery,
                    detail: e.to_string(),
                };
            }
        };

        let tokens = recipient_tokens(&users, &event.creator_id);
        if tokens.is_empty() {
            tracing::info!("No recipient tokens found");
            return FanoutOutcome::Skipped {
                reason: SkipReason::NoRecipients,
            };
        }

        let message = build_message(event, tokens);
        let recipients = message.tokens.len();

        match self.transport.send_multicast(&message).await {
            Ok(report) if report.failures.is_empty() => {
                tracing::info!(
                    success_count = report.success_count,
                    recipients,
                    "Successfully sent notifications"
                );
                FanoutOutcome::Delivered {
                    success_count: report.success_count,
                }
            }
            Ok(report) => {
                tracing::warn!(
                    success_count = report.success_count,
                    failure_count = report.failures.len(),
                    recipients,
                    "Transport rejected some tokens"
                );
                FanoutOutcome::Partial {
                    success_count: report.success_count,
                    failures: report.failures,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, recipients, "Multicast dispatch failed");
                FanoutOutcome::Failed {
                    stage: FanoutStage::Dispatch,
                    detail: e.to_string(),
                }
            }
        }
    }
}

/// Collect the multicast target list from a directory scan.
///
/// Keeps every usable token except the ride creator's, in directory
/// iteration order. A missing, null, or empty token makes the record
/// ineligible.
pub fn recipient_tokens(users: &[UserRecord], creator_id: &str) -> Vec<String> {
    users
        .iter()
        .filter(|user| user.user_id != creator_id)
        .filter_map(|user| user.push_token.as_deref())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Build the notification for a new ride.
///
/// The body interpolates the ride's destination; an absent or empty
/// destination falls back to a generic phrase.
pub fn build_message(event: &RideEvent, tokens: Vec<String>) -> PushMessage {
    let destination = event
        .destination
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(FALLBACK_DESTINATION);

    PushMessage {
        title: NOTIFICATION_TITLE.to_string(),
        body: format!("Destination: {}", destination),
        tokens,
    }
}
