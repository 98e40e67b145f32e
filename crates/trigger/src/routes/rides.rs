//! Ride-created event trigger endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use ridecast_common::types::RideEvent;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/events/ride-created", post(ride_created))
}

/// Receive one ride-created event and run the fan-out.
///
/// Always acknowledges with 204, whatever the fan-out outcome: failing the
/// acknowledgment would make the event infrastructure redeliver and amplify
/// duplicate notifications. The outcome is surfaced through logging only.
async fn ride_created(State(state): State<AppState>, Json(event): Json<RideEvent>) -> StatusCode {
    let outcome = state.notifier.handle_ride_created(&event).await;
    tracing::info!(ride_id = %event.ride_id, %outcome, "Ride fan-out complete");
    StatusCode::NO_CONTENT
}
