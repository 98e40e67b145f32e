//! Trigger endpoint tests.
//!
//! The event acknowledgment must be success whatever happens inside the
//! fan-out; only a malformed request body is rejected (before the handler
//! runs), which cannot amplify notifications on redelivery.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use ridecast_common::error::AppError;
use ridecast_common::types::{MulticastReport, PushMessage, UserRecord};
use ridecast_notifier::directory::UserDirectory;
use ridecast_notifier::fanout::FanoutNotifier;
use ridecast_notifier::transport::PushTransport;
use ridecast_trigger::routes::create_router;
use ridecast_trigger::state::AppState;

// ============================================================
// Fakes
// ============================================================

struct FakeDirectory {
    result: Result<Vec<UserRecord>, String>,
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn users_with_push_tokens(&self) -> Result<Vec<UserRecord>, AppError> {
        match &self.result {
            Ok(users) => Ok(users.clone()),
            Err(reason) => Err(AppError::Directory(reason.clone())),
        }
    }
}

/// Transport fake that accepts every token and counts dispatch calls.
struct FakeTransport {
    calls: Mutex<usize>,
}

impl FakeTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PushTransport for FakeTransport {
    async fn send_multicast(&self, message: &PushMessage) -> Result<MulticastReport, AppError> {
        *self.calls.lock().unwrap() += 1;
        Ok(MulticastReport {
            success_count: message.tokens.len() as u32,
            failures: Vec::new(),
        })
    }
}

// ============================================================
// Helpers
// ============================================================

fn app(directory: FakeDirectory, transport: Arc<FakeTransport>) -> axum::Router {
    let notifier = FanoutNotifier::new(Arc::new(directory), transport);
    create_router(AppState::new(notifier))
}

fn some_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            user_id: "u1".to_string(),
            push_token: Some("tokenA".to_string()),
        },
        UserRecord {
            user_id: "u2".to_string(),
            push_token: Some("tokenB".to_string()),
        },
    ]
}

fn ride_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/events/ride-created")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================
// Tests
// ============================================================

#[tokio::test]
async fn test_ride_created_acknowledges_no_content() {
    let transport = FakeTransport::new();
    let app = app(
        FakeDirectory {
            result: Ok(some_users()),
        },
        transport.clone(),
    );

    let response = app
        .oneshot(ride_request(
            r#"{"rideId":"ride-1","creatorId":"u1","destination":"Lagos"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_ride_created_acknowledges_when_directory_fails() {
    let transport = FakeTransport::new();
    let app = app(
        FakeDirectory {
            result: Err("auth expired".to_string()),
        },
        transport.clone(),
    );

    let response = app
        .oneshot(ride_request(r#"{"rideId":"ride-2","creatorId":"u1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(transport.calls(), 0, "No dispatch after query failure");
}

#[tokio::test]
async fn test_ride_created_without_destination_acknowledged() {
    let transport = FakeTransport::new();
    let app = app(
        FakeDirectory {
            result: Ok(some_users()),
        },
        transport.clone(),
    );

    let response = app
        .oneshot(ride_request(r#"{"rideId":"ride-3","creatorId":"u2"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_malformed_body_rejected_before_fanout() {
    let transport = FakeTransport::new();
    let app = app(
        FakeDirectory {
            result: Ok(some_users()),
        },
        transport.clone(),
    );

    let response = app.oneshot(ride_request("{not json")).await.unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_health_check() {
    let transport = FakeTransport::new();
    let app = app(
        FakeDirectory {
            result: Ok(Vec::new()),
        },
        transport,
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
