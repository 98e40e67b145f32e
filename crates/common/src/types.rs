use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a newly created ride document, as handed over by the trigger.
///
/// Created exactly once by an external write to the ride collection and
/// immutable thereafter; this service only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideEvent {
    /// Store-assigned identifier of the new ride document.
    pub ride_id: String,
    /// User who posted the ride. Never notified.
    pub creator_id: String,
    #[serde(default)]
    pub destination: Option<String>,
    /// Document create time as reported by the store (logging only).
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One registered user as read from the user directory.
///
/// A missing push token and a null push token mean the same thing: the user
/// cannot receive pushes. Directory implementations map both to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    #[serde(default)]
    pub push_token: Option<String>,
}

/// Push notification handed to the transport in a single multicast call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    /// Multicast target list; the transport owns batching.
    pub tokens: Vec<String>,
}

/// Per-token delivery failure as classified by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendFailure {
    pub token: String,
    pub reason: String,
}

/// Aggregate result of one multicast dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulticastReport {
    pub success_count: u32,
    pub failures: Vec<SendFailure>,
}

/// Pipeline stage at which a fan-out attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanoutStage {
    DirectoryQuery,
    Dispatch,
}

/// Why a fan-out completed without invoking the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoRecipients,
}

/// Outcome of one fan-out invocation.
///
/// Every invocation produces exactly one outcome and acknowledges success to
/// the trigger regardless of which variant it is; failures are reported
/// through logging, never by failing the triggering operation. Best-effort,
/// at-most-one-attempt delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FanoutOutcome {
    /// Every token in the dispatch list was accepted by the transport.
    Delivered { success_count: u32 },
    /// The transport rejected some tokens; the rest were delivered.
    Partial {
        success_count: u32,
        failures: Vec<SendFailure>,
    },
    /// No eligible recipients; the transport was never invoked.
    Skipped { reason: SkipReason },
    /// Directory query or dispatch failed outright; nothing was delivered
    /// (or delivery state is unknown, for a dispatch-stage fault).
    Failed { stage: FanoutStage, detail: String },
}

impl FanoutOutcome {
    /// Number of deliveries the transport reported as successful.
    pub fn success_count(&self) -> u32 {
        match self {
            FanoutOutcome::Delivered { success_count }
            | FanoutOutcome::Partial { success_count, .. } => *success_count,
            FanoutOutcome::Skipped { .. } | FanoutOutcome::Failed { .. } => 0,
        }
    }
}

impl std::fmt::Display for FanoutStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FanoutStage::DirectoryQuery => write!(f, "directory_query"),
            FanoutStage::Dispatch => write!(f, "dispatch"),
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoRecipients => write!(f, "no_recipients"),
        }
    }
}

impl std::fmt::Display for FanoutOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FanoutOutcome::Delivered { success_count } => {
                write!(f, "delivered {} notifications", success_count)
            }
            FanoutOutcome::Partial {
                success_count,
                failures,
            } => write!(
                f,
                "delivered {} notifications, {} failed",
                success_count,
                failures.len()
            ),
            FanoutOutcome::Skipped { reason } => write!(f, "skipped ({})", reason),
            FanoutOutcome::Failed { stage, detail } => {
                write!(f, "failed at {}: {}", stage, detail)
            }
        }
    }
}
