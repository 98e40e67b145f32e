//! Multicast push delivery.

use async_trait::async_trait;

use ridecast_common::error::AppError;
use ridecast_common::types::{MulticastReport, PushMessage};

/// Multicast-send capability of the push gateway.
///
/// Batching, authentication, and per-token error classification belong to the
/// implementation, not to the fan-out pipeline.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Deliver one message to every token in `message.tokens`.
    ///
    /// Tokens the gateway rejects are reported as `failures` in the returned
    /// report; `Err` is reserved for faults that sink the whole dispatch.
    async fn send_multicast(&self, message: &PushMessage) -> Result<MulticastReport, AppError>;
}
