pub mod health;
pub mod rides;

use axum::Router;

use crate::state::AppState;

/// Build the complete trigger router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(rides::router())
        .with_state(state)
}
