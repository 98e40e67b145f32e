//! Read-only access to the user directory.

use async_trait::async_trait;

use ridecast_common::error::AppError;
use ridecast_common::types::UserRecord;

/// Read side of the user directory.
///
/// The fan-out performs one full scan filtered on "push token is not null";
/// there is no pagination, so directory size bounds the cost and latency of
/// each fan-out linearly.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// All user records whose push-token field is set.
    ///
    /// Implementations must treat an absent field and a null field the same
    /// way: the user is ineligible and does not appear in the result. The
    /// pipeline drops `None` and empty tokens again on its side, so a
    /// directory with different nullability semantics cannot widen the
    /// recipient set.
    async fn users_with_push_tokens(&self) -> Result<Vec<UserRecord>, AppError>;
}
