//! Shared application state for the Axum trigger server.

use std::sync::Arc;

use ridecast_notifier::fanout::FanoutNotifier;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub notifier: Arc<FanoutNotifier>,
}

impl AppState {
    pub fn new(notifier: FanoutNotifier) -> Self {
        Self {
            notifier: Arc::new(notifier),
        }
    }
}
